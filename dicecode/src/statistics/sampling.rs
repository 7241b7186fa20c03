use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::{dice::DiceNotation, statistics::roller::Roller};

/// What repeated rolls of one notation actually produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub notation: DiceNotation,
    pub samples: usize,
    pub observed_min: i64,
    pub observed_max: i64,
    pub mean: f64,
    /// Sample standard deviation; NaN for a single sample.
    pub std_dev: f64,
    pub histogram: BTreeMap<i64, u64>,
}

impl SampleSummary {
    /// True when every observed total lies within the notation's bounds.
    pub fn within_bounds(&self) -> bool {
        let (min, max) = self.notation.bounds();
        min <= self.observed_min && self.observed_max <= max
    }

    pub fn pretty_print(&self, f: &mut impl std::fmt::Write) -> std::fmt::Result {
        self.notation.pretty_print(f)?;
        write!(
            f,
            ": {} rolls, observed [{}, {}], mean {:.3} (expected {:.3}), std dev {:.3}",
            self.samples,
            self.observed_min,
            self.observed_max,
            self.mean,
            self.notation.mean(),
            self.std_dev,
        )
    }
}

pub fn sample(
    notation: &DiceNotation,
    samples: usize,
    roller: &mut Roller,
) -> anyhow::Result<SampleSummary> {
    if samples == 0 {
        anyhow::bail!("Cannot summarize zero samples of {notation}");
    }

    let totals: Vec<i64> = (0..samples).map(|_| notation.roll_total(roller)).collect();

    let mut histogram = BTreeMap::new();
    for &total in &totals {
        *histogram.entry(total).or_insert(0) += 1;
    }

    let as_f64: Vec<f64> = totals.iter().map(|&t| t as f64).collect();
    let mean = as_f64.iter().mean();
    let std_dev = as_f64.iter().std_dev();

    Ok(SampleSummary {
        notation: *notation,
        samples,
        observed_min: histogram.keys().next().copied().unwrap_or_default(),
        observed_max: histogram.keys().next_back().copied().unwrap_or_default(),
        mean,
        std_dev,
        histogram,
    })
}
