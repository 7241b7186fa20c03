//! Parsing, validation and evaluation of `[count]D<faces>[±modifier]` dice notation.

#[cfg(test)]
mod notation_test_strategies;

pub mod dice;
pub mod error;
pub mod notation_parser;
pub mod statistics;

pub mod prelude {
    pub use crate::{
        bounds,
        dice::{ALLOWED_FACES, DiceNotation, Faces, MAX_RECORDED_ROLLS, RollResult},
        error::{NotationError, NotationErrorKind},
        maximum, minimum,
        notation_parser::parse_notation,
        roll, roll_with,
        statistics::{
            roller::Roller,
            sampling::{SampleSummary, sample},
        },
    };
}

use crate::{
    dice::RollResult,
    error::NotationError,
    notation_parser::parse_notation,
    statistics::roller::Roller,
};

/// Rolls `notation` with a freshly seeded [`Roller`] and returns the total.
pub fn roll(notation: &str) -> Result<i64, NotationError> {
    Ok(parse_notation(notation)?.roll_total(&mut Roller::new()))
}

pub fn roll_with(notation: &str, roller: &mut Roller) -> Result<RollResult, NotationError> {
    Ok(parse_notation(notation)?.roll(roller))
}

/// The lowest and highest totals `notation` can produce, without rolling.
pub fn bounds(notation: &str) -> Result<(i64, i64), NotationError> {
    parse_notation(notation).map(|notation| notation.bounds())
}

pub fn minimum(notation: &str) -> Result<i64, NotationError> {
    parse_notation(notation).map(|notation| notation.minimum())
}

pub fn maximum(notation: &str) -> Result<i64, NotationError> {
    parse_notation(notation).map(|notation| notation.maximum())
}
