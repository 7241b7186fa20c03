use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::dice::Faces;

/// The only source of randomness for rolls. Seed it to replay a session of rolls exactly.
#[derive(Debug)]
pub struct Roller {
    rng: StdRng,
}

impl Roller {
    /// Seeded from the operating system, so every `Roller::new()` rolls differently.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Roller {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Roller {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Splits off a roller whose dice are unaffected by anything later rolled on `self`.
    pub fn fork(&mut self) -> Self {
        let mut seed = [0u8; 32];
        self.rng.fill(&mut seed);
        Roller {
            rng: StdRng::from_seed(seed),
        }
    }

    /// One die, uniform over `1..=faces`.
    pub fn d(&mut self, faces: u32) -> u32 {
        self.rng.random_range(1..=faces)
    }

    /// `count` dice of the same size, drawn lazily.
    pub fn dice(&mut self, count: u32, faces: Faces) -> impl Iterator<Item = u32> + '_ {
        (0..count).map(move |_| self.d(faces.get()))
    }

    /// Sum of `count` dice without holding on to any of them.
    pub fn sum_dice(&mut self, count: u32, faces: Faces) -> i64 {
        self.dice(count, faces).map(i64::from).sum()
    }

    #[cfg(test)]
    pub fn test_rng() -> Self {
        Self::from_seed(42)
    }
}
