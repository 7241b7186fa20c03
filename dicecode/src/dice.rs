use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

use crate::{
    error::{NotationError, NotationErrorKind},
    statistics::roller::Roller,
};

/// Every die size a notation may name.
pub const ALLOWED_FACES: [u32; 8] = [3, 4, 6, 8, 10, 12, 20, 100];

/// Number of sides on a die, guaranteed to be one of [`ALLOWED_FACES`].
#[derive(
    Debug, Display, Into, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Faces(u32);

impl Faces {
    pub fn new(faces: u32) -> Option<Self> {
        ALLOWED_FACES.contains(&faces).then_some(Self(faces))
    }

    /// Looks up a digit run exactly as written, so `"06"` is not a d6.
    pub fn from_digits(digits: &str) -> Option<Self> {
        ALLOWED_FACES
            .iter()
            .find(|faces| faces.to_string() == digits)
            .map(|&faces| Self(faces))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Faces {
    type Error = NotationErrorKind;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| NotationErrorKind::DisallowedFaceCount(value.to_string()))
    }
}

/// Dice beyond this many are still rolled and summed but not kept in [`RollResult`].
pub const MAX_RECORDED_ROLLS: u32 = 1000;

/// A validated `[count]D<faces>[±modifier]` roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceNotation {
    pub count: u32,
    pub faces: Faces,
    pub modifier: i64,
}

impl DiceNotation {
    pub fn new(count: u32, faces: Faces, modifier: i64) -> Self {
        Self {
            count,
            faces,
            modifier,
        }
    }

    /// Rolls every die, keeping at most [`MAX_RECORDED_ROLLS`] of the individual values.
    pub fn roll(&self, rng: &mut Roller) -> RollResult {
        let recorded = self.count.min(MAX_RECORDED_ROLLS);
        let individual_rolls: Vec<u32> = rng.dice(recorded, self.faces).collect();
        let unrecorded = rng.sum_dice(self.count - recorded, self.faces);

        let total = individual_rolls
            .iter()
            .map(|&roll| i64::from(roll))
            .sum::<i64>()
            .saturating_add(unrecorded)
            .saturating_add(self.modifier);

        log::trace!("{self} rolled {individual_rolls:?} (+{unrecorded} unrecorded) = {total}");

        RollResult {
            total,
            individual_rolls,
            unrecorded_rolls: self.count - recorded,
            notation: *self,
        }
    }

    /// Rolls every die without keeping any of them.
    pub fn roll_total(&self, rng: &mut Roller) -> i64 {
        let total = rng
            .sum_dice(self.count, self.faces)
            .saturating_add(self.modifier);
        log::trace!("{self} rolled {total}");
        total
    }

    /// Every die showing 1.
    pub fn minimum(&self) -> i64 {
        i64::from(self.count).saturating_add(self.modifier)
    }

    /// Every die showing its highest face.
    pub fn maximum(&self) -> i64 {
        (i64::from(self.count) * i64::from(self.faces.get())).saturating_add(self.modifier)
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.minimum(), self.maximum())
    }

    pub fn mean(&self) -> f64 {
        f64::from(self.count) * (f64::from(self.faces.get()) + 1.0) / 2.0 + self.modifier as f64
    }

    pub fn pretty_print(&self, f: &mut impl std::fmt::Write) -> std::fmt::Result {
        write!(f, "{}D{}", self.count, self.faces)?;
        if self.modifier > 0 {
            write!(f, "+{}", self.modifier)?;
        } else if self.modifier < 0 {
            write!(f, "{}", self.modifier)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for DiceNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.pretty_print(f)
    }
}

impl std::str::FromStr for DiceNotation {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::notation_parser::parse_notation(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub total: i64,
    pub individual_rolls: Vec<u32>,
    /// Dice that count towards `total` but are missing from `individual_rolls`.
    pub unrecorded_rolls: u32,
    pub notation: DiceNotation,
}

impl RollResult {
    pub fn pretty_print(&self, f: &mut impl std::fmt::Write) -> std::fmt::Result {
        write!(f, "Rolled ")?;
        self.notation.pretty_print(f)?;
        write!(f, ": [")?;
        for (i, roll) in self.individual_rolls.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", roll)?;
        }
        if self.unrecorded_rolls > 0 {
            write!(f, ", ... {} more", self.unrecorded_rolls)?;
        }
        write!(f, "] = {}", self.total)?;
        Ok(())
    }
}
