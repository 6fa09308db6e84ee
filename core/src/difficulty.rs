use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

use crate::*;

/// Difficulty level, doubling as the half-extent of the generated cube.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn level(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(level: u8) -> Result<Self> {
        match level {
            1 => Ok(Self::Easy),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Hard),
            other => Err(GameError::InvalidDifficulty(other)),
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(level) = s.parse::<u8>() {
            return Self::try_from(level);
        }
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownDifficulty)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_variants() {
        assert_eq!(Difficulty::try_from(2), Ok(Difficulty::Medium));
        assert_eq!(Difficulty::Hard.level(), 3);
        assert_eq!(Difficulty::try_from(0), Err(GameError::InvalidDifficulty(0)));
        assert_eq!(Difficulty::try_from(4), Err(GameError::InvalidDifficulty(4)));
    }

    #[test]
    fn parses_names_and_numbers() {
        assert_eq!("Hard".parse(), Ok(Difficulty::Hard));
        assert_eq!(" 1 ".parse(), Ok(Difficulty::Easy));
        assert_eq!("9".parse::<Difficulty>(), Err(GameError::InvalidDifficulty(9)));
        assert_eq!("nightmare".parse::<Difficulty>(), Err(GameError::UnknownDifficulty));
    }
}
