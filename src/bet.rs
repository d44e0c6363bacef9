use crate::config::{MAXIMUM_BET, MAX_NUMBER, MINIMUM_BET};
use crate::error::ValidationError;
use crate::roulette::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three standard dozens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dozen {
    First,
    Second,
    Third,
}

impl Dozen {
    pub const ALL: [Dozen; 3] = [Dozen::First, Dozen::Second, Dozen::Third];

    pub fn start(&self) -> u8 {
        match self {
            Dozen::First => 1,
            Dozen::Second => 13,
            Dozen::Third => 25,
        }
    }

    pub fn end(&self) -> u8 {
        self.start() + 11
    }

    /// Dozen by its position on the layout, 1 to 3.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Dozen::First),
            2 => Some(Dozen::Second),
            3 => Some(Dozen::Third),
            _ => None,
        }
    }

    pub fn from_range(start: u8, end: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.start() == start && d.end() == end)
    }

    pub fn contains(&self, number: u8) -> bool {
        (self.start()..=self.end()).contains(&number)
    }
}

/// What a wager is placed on. The qualifier lives in the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BetKind {
    Number(u8),
    Color(Color),
    Odd,
    Even,
    High,
    Low,
    Dozen(Dozen),
}

impl BetKind {
    /// Name used for the payout table and in saves.
    pub fn name(&self) -> &'static str {
        match self {
            BetKind::Number(_) => "number",
            BetKind::Color(_) => "color",
            BetKind::Odd => "odd",
            BetKind::Even => "even",
            BetKind::High => "high",
            BetKind::Low => "low",
            BetKind::Dozen(_) => "dozen",
        }
    }

    /// Build a kind from its name and the optional qualifier typed by the player.
    ///
    /// `red` and `black` are accepted as kinds on their own, and a dozen may be
    /// given either as its index (`1`..`3`) or as a range (`13-24`).
    pub fn parse(kind: &str, qualifier: Option<&str>) -> Result<Self, ValidationError> {
        let kind = kind.trim().to_ascii_lowercase();
        match kind.as_str() {
            "number" | "n" => {
                let value = qualifier.ok_or(ValidationError::MissingQualifier("number"))?;
                let number = value
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .filter(|n| *n <= MAX_NUMBER)
                    .ok_or_else(|| invalid("number", value))?;
                Ok(BetKind::Number(number))
            }
            "color" | "colour" => {
                let value = qualifier.ok_or(ValidationError::MissingQualifier("color"))?;
                parse_color(value).map(BetKind::Color)
            }
            "red" => Ok(BetKind::Color(Color::Red)),
            "black" => Ok(BetKind::Color(Color::Black)),
            "odd" => Ok(BetKind::Odd),
            "even" => Ok(BetKind::Even),
            "high" => Ok(BetKind::High),
            "low" => Ok(BetKind::Low),
            "dozen" => {
                let value = qualifier.ok_or(ValidationError::MissingQualifier("dozen"))?;
                parse_dozen(value).map(BetKind::Dozen)
            }
            _ => Err(ValidationError::UnknownKind(kind)),
        }
    }

    /// Whether the kind carries a qualifier in its textual form.
    pub fn takes_qualifier(kind: &str) -> bool {
        matches!(
            kind.trim().to_ascii_lowercase().as_str(),
            "number" | "n" | "color" | "colour" | "dozen"
        )
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetKind::Number(n) => write!(f, "number ({n})"),
            BetKind::Color(c) => write!(f, "color ({c})"),
            BetKind::Dozen(d) => write!(f, "dozen ({}-{})", d.start(), d.end()),
            other => f.write_str(other.name()),
        }
    }
}

fn invalid(kind: &'static str, value: &str) -> ValidationError {
    ValidationError::InvalidQualifier {
        kind,
        value: value.to_string(),
    }
}

fn parse_color(value: &str) -> Result<Color, ValidationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "red" | "r" => Ok(Color::Red),
        "black" | "k" => Ok(Color::Black),
        _ => Err(invalid("color", value)),
    }
}

fn parse_dozen(value: &str) -> Result<Dozen, ValidationError> {
    let trimmed = value.trim();
    let dozen = match trimmed.split_once('-') {
        Some((start, end)) => match (start.trim().parse(), end.trim().parse()) {
            (Ok(start), Ok(end)) => Dozen::from_range(start, end),
            _ => None,
        },
        None => trimmed.parse().ok().and_then(Dozen::from_index),
    };
    dozen.ok_or_else(|| invalid("dozen", value))
}

pub fn validate_stake(stake: u64) -> Result<u64, ValidationError> {
    if stake == 0 {
        return Err(ValidationError::ZeroStake);
    }
    if stake < MINIMUM_BET {
        return Err(ValidationError::BelowMinimum {
            stake,
            min: MINIMUM_BET,
        });
    }
    if stake > MAXIMUM_BET {
        return Err(ValidationError::AboveMaximum {
            stake,
            max: MAXIMUM_BET,
        });
    }
    Ok(stake)
}

/// A validated wager. Fields are private, so a `Bet` can only exist with a
/// stake inside the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBet", into = "RawBet")]
pub struct Bet {
    kind: BetKind,
    stake: u64,
}

impl Bet {
    pub fn new(kind: BetKind, stake: u64) -> Result<Self, ValidationError> {
        if let BetKind::Number(n) = kind {
            if n > MAX_NUMBER {
                return Err(invalid("number", &n.to_string()));
            }
        }
        if let BetKind::Color(Color::Green) = kind {
            return Err(invalid("color", "green"));
        }
        let stake = validate_stake(stake)?;
        Ok(Bet { kind, stake })
    }

    /// Construct from textual parts, as typed at the prompt.
    pub fn parse(kind: &str, qualifier: Option<&str>, stake: u64) -> Result<Self, ValidationError> {
        Bet::new(BetKind::parse(kind, qualifier)?, stake)
    }

    pub fn kind(&self) -> BetKind {
        self.kind
    }

    pub fn stake(&self) -> u64 {
        self.stake
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ${}", self.kind, self.stake)
    }
}

/// On-disk shape of a bet: `{bet_type, value, amount}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBet {
    bet_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<RawValue>,
    amount: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(u8),
    Range([u8; 2]),
    Text(String),
}

impl From<Bet> for RawBet {
    fn from(bet: Bet) -> Self {
        let value = match bet.kind {
            BetKind::Number(n) => Some(RawValue::Number(n)),
            BetKind::Color(c) => Some(RawValue::Text(c.as_str().to_string())),
            BetKind::Dozen(d) => Some(RawValue::Range([d.start(), d.end()])),
            _ => None,
        };
        RawBet {
            bet_type: bet.kind.name().to_string(),
            value,
            amount: bet.stake,
        }
    }
}

impl TryFrom<RawBet> for Bet {
    type Error = ValidationError;

    fn try_from(raw: RawBet) -> Result<Self, Self::Error> {
        let kind = match (raw.bet_type.as_str(), raw.value) {
            ("number", Some(RawValue::Number(n))) if n <= MAX_NUMBER => BetKind::Number(n),
            ("color", Some(RawValue::Text(c))) => BetKind::Color(parse_color(&c)?),
            ("dozen", Some(RawValue::Range([start, end]))) => Dozen::from_range(start, end)
                .map(BetKind::Dozen)
                .ok_or_else(|| invalid("dozen", &format!("{start}-{end}")))?,
            ("number", _) => return Err(invalid("number", "malformed")),
            ("color", _) => return Err(invalid("color", "malformed")),
            ("dozen", _) => return Err(invalid("dozen", "malformed")),
            (other, _) => BetKind::parse(other, None)?,
        };
        Bet::new(kind, raw.amount)
    }
}
