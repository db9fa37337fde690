//! Dice Adapters - Fair RNG and Operator Override
//!
//! `FairDice` draws from a seedable `StdRng`. `ScriptedDice` plays a
//! queue of forced rolls first (operator override, replays, tests) and
//! falls back to fair dice once the queue is empty.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::ports::dice::DiceSource;

/// Two fair six-sided dice.
pub struct FairDice {
    rng: StdRng,
}

impl FairDice {
    /// Dice seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible dice for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for FairDice {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceSource for FairDice {
    fn roll(&mut self) -> (u8, u8) {
        (self.rng.gen_range(1..=6), self.rng.gen_range(1..=6))
    }
}

/// Forced rolls, then fair dice.
pub struct ScriptedDice {
    queue: VecDeque<(u8, u8)>,
    fallback: FairDice,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = (u8, u8)>, fallback: FairDice) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
            fallback,
        }
    }

    /// Queues one more forced roll.
    pub fn push(&mut self, die1: u8, die2: u8) {
        self.queue.push_back((die1, die2));
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> (u8, u8) {
        match self.queue.pop_front() {
            Some(dice) => {
                debug!(die1 = dice.0, die2 = dice.1, "Scripted roll");
                dice
            }
            None => self.fallback.roll(),
        }
    }
}
