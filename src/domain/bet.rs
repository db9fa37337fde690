//! Bet vocabulary.
//!
//! Every wager on the table is identified by a `BetKey` drawn from a
//! closed set. Come/Don't-Come bets that have travelled to a number use
//! the `TravelKey` sub-type, so a fresh `come` and a resting
//! `come-point-6` can never be confused.
//!
//! Keys render as kebab-case strings (`pass-line`, `place-6`,
//! `dont-come-point-10`) for persistence and logging; the same strings
//! parse back through `FromStr`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CrapsError;

// ────────────────────────────────────────────
// Numbers
// ────────────────────────────────────────────

/// A point number: 4, 5, 6, 8, 9 or 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Point {
    Four = 4,
    Five = 5,
    Six = 6,
    Eight = 8,
    Nine = 9,
    Ten = 10,
}

impl Point {
    /// All point numbers in table order.
    pub const ALL: [Self; 6] = [
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Eight,
        Self::Nine,
        Self::Ten,
    ];

    /// The numeric value of the point.
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the point for a roll total, or `None` for 2, 3, 7, 11, 12.
    pub fn from_total(total: u8) -> Option<Self> {
        Self::try_from(total).ok()
    }
}

impl TryFrom<u8> for Point {
    type Error = CrapsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            6 => Ok(Self::Six),
            8 => Ok(Self::Eight),
            9 => Ok(Self::Nine),
            10 => Ok(Self::Ten),
            other => Err(CrapsError::InvalidPoint(other)),
        }
    }
}

impl From<Point> for u8 {
    fn from(point: Point) -> Self {
        point.value()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A hardway number: 4, 6, 8 or 10 (the even points that can be rolled as doubles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum HardNumber {
    Four = 4,
    Six = 6,
    Eight = 8,
    Ten = 10,
}

impl HardNumber {
    pub const ALL: [Self; 4] = [Self::Four, Self::Six, Self::Eight, Self::Ten];

    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for HardNumber {
    type Error = CrapsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            6 => Ok(Self::Six),
            8 => Ok(Self::Eight),
            10 => Ok(Self::Ten),
            other => Err(CrapsError::InvalidPoint(other)),
        }
    }
}

/// One-roll proposition bets from the center of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Proposition {
    /// Any 7.
    AnySeven,
    /// Any of 2, 3, 12.
    AnyCraps,
    /// 11 ("yo").
    Eleven,
    /// 3, rolled as 1 and 2.
    AceDeuce,
}

impl Proposition {
    pub const ALL: [Self; 4] = [Self::AnySeven, Self::AnyCraps, Self::Eleven, Self::AceDeuce];

    /// Whether the proposition wins on this total.
    pub const fn wins_on(self, total: u8) -> bool {
        match self {
            Self::AnySeven => total == 7,
            Self::AnyCraps => matches!(total, 2 | 3 | 12),
            Self::Eleven => total == 11,
            Self::AceDeuce => total == 3,
        }
    }

    const fn slug(self) -> &'static str {
        match self {
            Self::AnySeven => "any-7",
            Self::AnyCraps => "any-craps",
            Self::Eleven => "eleven",
            Self::AceDeuce => "ace-deuce",
        }
    }

    /// Older spellings still accepted when parsing.
    fn from_alias(s: &str) -> Option<Self> {
        match s {
            "any-seven" => Some(Self::AnySeven),
            "yo-eleven" => Some(Self::Eleven),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────
// Travel keys
// ────────────────────────────────────────────

/// Which contract bet travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TravelKind {
    Come,
    DontCome,
}

impl TravelKind {
    /// The fresh bet that travels as this kind.
    pub const fn fresh_key(self) -> BetKey {
        match self {
            Self::Come => BetKey::Come,
            Self::DontCome => BetKey::DontCome,
        }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::Come => "come-point-",
            Self::DontCome => "dont-come-point-",
        }
    }
}

impl fmt::Display for TravelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Come => write!(f, "come"),
            Self::DontCome => write!(f, "dont-come"),
        }
    }
}

/// A Come or Don't-Come bet resting on a specific number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TravelKey {
    pub kind: TravelKind,
    pub number: Point,
}

impl TravelKey {
    pub const fn new(kind: TravelKind, number: Point) -> Self {
        Self { kind, number }
    }

    pub const fn come(number: Point) -> Self {
        Self::new(TravelKind::Come, number)
    }

    pub const fn dont_come(number: Point) -> Self {
        Self::new(TravelKind::DontCome, number)
    }
}

impl fmt::Display for TravelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.number)
    }
}

// ────────────────────────────────────────────
// Bet key
// ────────────────────────────────────────────

/// Identifier of a wager on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BetKey {
    PassLine,
    /// Odds behind the pass line, paid at true odds on the point.
    PassLineOdds,
    DontPass,
    Field,
    Come,
    DontCome,
    Place(Point),
    Hard(HardNumber),
    Prop(Proposition),
    Travel(TravelKey),
}

impl BetKey {
    /// Bets a player may place directly (travel keys are engine-derived).
    pub fn placeable() -> Vec<Self> {
        let mut keys = vec![
            Self::PassLine,
            Self::PassLineOdds,
            Self::DontPass,
            Self::Field,
            Self::Come,
            Self::DontCome,
        ];
        keys.extend(Point::ALL.into_iter().map(Self::Place));
        keys.extend(HardNumber::ALL.into_iter().map(Self::Hard));
        keys.extend(Proposition::ALL.into_iter().map(Self::Prop));
        keys
    }

    /// One-roll bets: resolved on every roll and never left on the table.
    pub const fn is_one_roll(self) -> bool {
        matches!(self, Self::Field | Self::Prop(_))
    }

    pub const fn travel(self) -> Option<TravelKey> {
        match self {
            Self::Travel(key) => Some(key),
            _ => None,
        }
    }
}

impl From<TravelKey> for BetKey {
    fn from(key: TravelKey) -> Self {
        Self::Travel(key)
    }
}

impl fmt::Display for BetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassLine => write!(f, "pass-line"),
            Self::PassLineOdds => write!(f, "pass-line-odds"),
            Self::DontPass => write!(f, "dont-pass"),
            Self::Field => write!(f, "field"),
            Self::Come => write!(f, "come"),
            Self::DontCome => write!(f, "dont-come"),
            Self::Place(n) => write!(f, "place-{n}"),
            Self::Hard(n) => write!(f, "hard-{}", n.value()),
            Self::Prop(p) => write!(f, "{}", p.slug()),
            Self::Travel(key) => write!(f, "{key}"),
        }
    }
}

fn parse_number(raw: &str, original: &str) -> Result<u8, CrapsError> {
    raw.parse::<u8>()
        .map_err(|_| CrapsError::UnknownBet(original.to_string()))
}

impl FromStr for BetKey {
    type Err = CrapsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || CrapsError::UnknownBet(s.to_string());

        match s {
            "pass-line" => return Ok(Self::PassLine),
            "pass-line-odds" => return Ok(Self::PassLineOdds),
            "dont-pass" => return Ok(Self::DontPass),
            "field" => return Ok(Self::Field),
            "come" => return Ok(Self::Come),
            "dont-come" => return Ok(Self::DontCome),
            _ => {}
        }

        if let Some(prop) = Proposition::ALL
            .into_iter()
            .find(|p| p.slug() == s)
            .or_else(|| Proposition::from_alias(s))
        {
            return Ok(Self::Prop(prop));
        }

        if let Some(rest) = s.strip_prefix("dont-come-point-") {
            let point = Point::try_from(parse_number(rest, s)?).map_err(|_| unknown())?;
            return Ok(Self::Travel(TravelKey::dont_come(point)));
        }
        if let Some(rest) = s.strip_prefix("come-point-") {
            let point = Point::try_from(parse_number(rest, s)?).map_err(|_| unknown())?;
            return Ok(Self::Travel(TravelKey::come(point)));
        }
        if let Some(rest) = s.strip_prefix("place-") {
            let point = Point::try_from(parse_number(rest, s)?).map_err(|_| unknown())?;
            return Ok(Self::Place(point));
        }
        if let Some(rest) = s.strip_prefix("hard-") {
            let hard = HardNumber::try_from(parse_number(rest, s)?).map_err(|_| unknown())?;
            return Ok(Self::Hard(hard));
        }

        Err(unknown())
    }
}

impl From<TravelKey> for String {
    fn from(key: TravelKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for TravelKey {
    type Error = CrapsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse::<BetKey>()?
            .travel()
            .ok_or(CrapsError::UnknownBet(value))
    }
}

impl From<BetKey> for String {
    fn from(key: BetKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for BetKey {
    type Error = CrapsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
