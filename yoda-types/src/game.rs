use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::MoveParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

impl Move {
    pub const ALL: [Move; 5] = [
        Move::Rock,
        Move::Paper,
        Move::Scissors,
        Move::Lizard,
        Move::Spock,
    ];

    /// Wire token, as used in `/play/{move}` and in responses
    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
            Move::Lizard => "lizard",
            Move::Spock => "spock",
        }
    }

    /// Image asset name: token with its first letter uppercased, plus `.jpg`
    pub fn image_file_name(self) -> String {
        format!("{}.jpg", capitalize_first(self.as_str()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Move::ALL
            .into_iter()
            .find(|m| m.as_str() == token)
            .ok_or_else(|| MoveParseError::UnknownMove(token.to_string()))
    }
}

pub fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Server-authoritative tally. Never incremented on the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResponse {
    pub player_move: Move,
    pub computer_move: Move,
    pub result: String,
    #[serde(default)]
    pub commentary: Option<String>,
    // Older backends only send the free-text `result`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl PlayResponse {
    pub fn score(&self) -> Score {
        Score {
            wins: self.wins,
            losses: self.losses,
            ties: self.ties,
        }
    }
}
