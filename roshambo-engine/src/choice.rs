use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A player's move. `None` is the placeholder stored between commit and
/// reveal; it is never accepted as a revealed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Choice {
    None = 0,
    Rock = 1,
    Paper = 2,
    Scissors = 3,
}

impl Choice {
    /// Integer encoding used inside the commitment digest.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Fixed precedence: Paper > Rock, Rock > Scissors, Scissors > Paper.
    /// `None` beats nothing and is beaten by nothing.
    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Paper, Choice::Rock)
                | (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
        )
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Choice::None => "none",
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" => Ok(Choice::Scissors),
            other => Err(format!("unknown choice: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_cycle() {
        assert!(Choice::Paper.beats(Choice::Rock));
        assert!(Choice::Rock.beats(Choice::Scissors));
        assert!(Choice::Scissors.beats(Choice::Paper));

        assert!(!Choice::Rock.beats(Choice::Paper));
        assert!(!Choice::Scissors.beats(Choice::Rock));
        assert!(!Choice::Paper.beats(Choice::Scissors));
    }

    #[test]
    fn test_none_beats_nothing() {
        for c in [Choice::None, Choice::Rock, Choice::Paper, Choice::Scissors] {
            assert!(!Choice::None.beats(c));
            assert!(!c.beats(Choice::None));
        }
    }

    #[test]
    fn test_equal_choices_never_beat() {
        for c in [Choice::Rock, Choice::Paper, Choice::Scissors] {
            assert!(!c.beats(c));
        }
    }

    #[test]
    fn test_integer_encoding() {
        assert_eq!(Choice::None.as_u8(), 0);
        assert_eq!(Choice::Rock.as_u8(), 1);
        assert_eq!(Choice::Paper.as_u8(), 2);
        assert_eq!(Choice::Scissors.as_u8(), 3);
    }

    #[test]
    fn test_parse_from_cli_input() {
        assert_eq!("rock".parse::<Choice>().unwrap(), Choice::Rock);
        assert_eq!("PAPER".parse::<Choice>().unwrap(), Choice::Paper);
        assert_eq!("Scissors".parse::<Choice>().unwrap(), Choice::Scissors);
        assert!("none".parse::<Choice>().is_err());
        assert!("lizard".parse::<Choice>().is_err());
    }
}
