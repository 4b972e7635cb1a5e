use std::{
    fmt::{Display, Formatter},
    num::NonZeroU32,
    str::FromStr,
};

use chess_ai_core::error::SelectError;
use minimax_bot::AlphaBetaEngine;
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, u32},
    combinator::{all_consuming, opt, value},
    sequence::{pair, preceded},
    IResult,
};

/// How hard the automated opponent plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Any legal move, uniformly at random.
    Random,
    /// Best material after one ply.
    Greedy,
    /// Minimax with alpha-beta pruning, `depth` plies deep.
    AlphaBeta { depth: NonZeroU32 },
}

impl Difficulty {
    pub const EASY: Self = Difficulty::Random;
    pub const MEDIUM: Self = Difficulty::Greedy;
    pub const HARD: Self = Difficulty::AlphaBeta {
        depth: AlphaBetaEngine::DEFAULT_DEPTH,
    };
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::HARD
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Random => write!(f, "random"),
            Difficulty::Greedy => write!(f, "greedy"),
            Difficulty::AlphaBeta { depth } => write!(f, "alphabeta:{depth}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Random,
    Greedy,
    AlphaBeta,
}

fn tier(i: &str) -> IResult<&str, Tier> {
    alt((
        value(Tier::Random, alt((tag_no_case("random"), tag_no_case("easy")))),
        value(Tier::Greedy, alt((tag_no_case("greedy"), tag_no_case("medium")))),
        value(
            Tier::AlphaBeta,
            alt((
                tag_no_case("alphabeta"),
                tag_no_case("alpha-beta"),
                tag_no_case("hard"),
            )),
        ),
    ))(i)
}

fn difficulty(i: &str) -> IResult<&str, (Tier, Option<u32>)> {
    all_consuming(pair(tier, opt(preceded(char(':'), u32))))(i)
}

impl FromStr for Difficulty {
    type Err = SelectError;

    /// Accepts `random`/`easy`, `greedy`/`medium` and `alphabeta`/`hard`,
    /// the last optionally followed by `:<depth>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SelectError::UnknownDifficulty(s.to_string());
        let (_, parsed) = difficulty(s.trim()).map_err(|_| unknown())?;

        match parsed {
            (Tier::Random, None) => Ok(Difficulty::Random),
            (Tier::Greedy, None) => Ok(Difficulty::Greedy),
            (Tier::AlphaBeta, None) => Ok(Difficulty::HARD),
            (Tier::AlphaBeta, Some(depth)) => NonZeroU32::new(depth)
                .map(|depth| Difficulty::AlphaBeta { depth })
                .ok_or_else(unknown),
            (Tier::Random | Tier::Greedy, Some(_)) => Err(unknown()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabeta(depth: u32) -> Difficulty {
        Difficulty::AlphaBeta {
            depth: NonZeroU32::new(depth).unwrap(),
        }
    }

    #[test]
    fn parse_tiers() {
        assert_eq!("random".parse::<Difficulty>(), Ok(Difficulty::Random));
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Random));
        assert_eq!("greedy".parse::<Difficulty>(), Ok(Difficulty::Greedy));
        assert_eq!("MEDIUM".parse::<Difficulty>(), Ok(Difficulty::Greedy));
        assert_eq!("hard".parse::<Difficulty>(), Ok(alphabeta(3)));
        assert_eq!(" alphabeta \n".parse::<Difficulty>(), Ok(alphabeta(3)));
        assert_eq!("alpha-beta:5".parse::<Difficulty>(), Ok(alphabeta(5)));
    }

    #[test]
    fn default_is_hard() {
        assert_eq!(Difficulty::default(), alphabeta(3));
    }

    #[test]
    fn reject_unknown() {
        for tag in ["", "impossible", "random:2", "greedy:1", "alphabeta:0", "alphabeta:x", "hard:", "hardest"] {
            assert_eq!(
                tag.parse::<Difficulty>(),
                Err(SelectError::UnknownDifficulty(tag.to_string())),
                "{tag:?}"
            );
        }
    }

    #[test]
    fn display_parses_back() {
        for difficulty in [Difficulty::Random, Difficulty::Greedy, alphabeta(1), alphabeta(4)] {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!(Difficulty::HARD.to_string(), "alphabeta:3");
    }
}
