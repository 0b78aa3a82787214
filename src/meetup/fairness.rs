use crate::meetup::InvalidInput;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FairnessTier {
    Good,
    Medium,
    Poor,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Fairness {
    pub score: f64,
    pub tier: FairnessTier,
}

impl Fairness {
    /// The score as a whole percentage, for display only.
    pub fn percentage(&self) -> u8 {
        (self.score * 100.0).round() as u8
    }
}

/// Lower bounds (exclusive) of the good and medium tiers.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct FairnessThresholds {
    pub good_threshold: f64,
    pub medium_threshold: f64,
}

impl FairnessThresholds {
    pub fn tier(&self, score: f64) -> FairnessTier {
        if score > self.good_threshold {
            FairnessTier::Good
        } else if score > self.medium_threshold {
            FairnessTier::Medium
        } else {
            FairnessTier::Poor
        }
    }
}

impl Default for FairnessThresholds {
    fn default() -> Self {
        FairnessThresholds {
            good_threshold: 0.9,
            medium_threshold: 0.7,
        }
    }
}

pub fn compute_fairness(times: &[f64]) -> Result<Fairness, InvalidInput> {
    compute_fairness_with(times, &FairnessThresholds::default())
}

/// Scores the spread of travel times as `exp(-σ/μ)`, 1 meaning everyone travels equally long.
pub fn compute_fairness_with(times: &[f64], thresholds: &FairnessThresholds) -> Result<Fairness, InvalidInput> {
    if times.is_empty() {
        return Err(InvalidInput::NoTravelTimes);
    }

    if let Some(&invalid) = times.iter().find(|t| !t.is_finite() || **t < 0.0) {
        return Err(InvalidInput::InvalidTravelTime(invalid));
    }

    // σ/μ does not change with scale, dividing by the largest sample keeps the sums finite
    let largest = times.iter().copied().fold(0.0, f64::max);

    // Everyone is already there
    let score = if largest > 0.0 {
        let n = times.len() as f64;
        let scaled = times.iter().map(|t| t / largest).collect::<Vec<_>>();
        let mean = scaled.iter().sum::<f64>() / n;
        let variance = scaled.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n;
        (-variance.sqrt() / mean).exp()
    } else {
        1.0
    };

    Ok(Fairness {
        score,
        tier: thresholds.tier(score),
    })
}
