//! T-score normalization and overall score aggregation.
//!
//! Per battery, independently of the others: the cohort mean and the
//! population standard deviation (divisor = N, not N−1) standardize the
//! target's raw score as `T = 50 + 10 * (raw - mean) / std`. The overall
//! score is the unweighted T-score sum rescaled by 30/400.

use serde::{Deserialize, Serialize};

use crate::model::{Battery, BatterySet, CandidateRecord};
use crate::scoring::raw_of;

/// Descriptive statistics of one battery's raw scores within a cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryStats {
    pub mean: f64,
    pub std: f64,
}

/// Mean and population standard deviation of a cohort's raw scores.
///
/// A cohort of exactly one member gets std = 1 instead of 0. That floor is
/// deliberate: it keeps the T-score formula defined for singleton cohorts,
/// whose results callers should treat as degenerate. Cohorts larger than
/// one keep the population statistic as-is, zero variance included.
pub fn battery_stats(scores: &[f64]) -> BatteryStats {
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let std = if scores.len() == 1 {
        1.0
    } else {
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt()
    };
    BatteryStats { mean, std }
}

/// Standardize one raw score against its cohort: `50 + 10 * (raw - mean) / std`.
pub fn t_score(raw: f64, stats: &BatteryStats) -> f64 {
    50.0 + 10.0 * (raw - stats.mean) / stats.std
}

/// Combine the five T-scores into the overall score: `sum(T) * 30 / 400`.
/// Full precision; rounding happens at the reporting boundary.
pub fn overall_score(t_scores: &BatterySet<f64>) -> f64 {
    t_scores.sum() * 30.0 / 400.0
}

/// Round to two decimals. Applied only where values leave the core:
/// report views and export rows.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The target's standardized scores against one cohort, plus the cohort's
/// per-battery statistics for transparency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    pub t_scores: BatterySet<f64>,
    /// Overall score at full precision.
    pub overall: f64,
    pub battery_stats: BatterySet<BatteryStats>,
}

/// Normalize `target` against `cohort`.
///
/// The target must itself be a member of the cohort, so its raw score
/// contributes to the mean and standard deviation. Batteries are processed
/// independently; no cross-battery covariance is modeled.
pub fn normalize(cohort: &[&CandidateRecord], target: &CandidateRecord) -> Normalization {
    let battery_stats = BatterySet::from_fn(|battery| {
        let scores: Vec<f64> = cohort.iter().map(|r| raw_of(r, battery)).collect();
        self::battery_stats(&scores)
    });
    let t_scores =
        BatterySet::from_fn(|battery| t_score(raw_of(target, battery), battery_stats.get(battery)));
    let overall = overall_score(&t_scores);
    Normalization {
        t_scores,
        overall,
        battery_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BatteryInput;
    use chrono::{NaiveDate, Utc};

    fn candidate(roll_no: &str, attempts: u32, accuracy: f64) -> CandidateRecord {
        let mut record = CandidateRecord {
            roll_no: roll_no.into(),
            is_reexam: false,
            cbt2_marks: 0.0,
            rrb_zone: "Chennai".into(),
            exam_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            shift: "morning".into(),
            batteries: BatterySet::from_fn(|_| BatteryInput { attempts, accuracy }),
            raw_scores: None,
            created_at: Utc::now(),
        };
        crate::scoring::compute_raw_scores(&mut record);
        record
    }

    #[test]
    fn stats_use_population_divisor() {
        // raws 8 and 12: mean 10, population std 2 (sample std would be ~2.83)
        let stats = battery_stats(&[8.0, 12.0]);
        assert_eq!(stats.mean, 10.0);
        assert_eq!(stats.std, 2.0);
    }

    #[test]
    fn singleton_cohort_gets_std_floor() {
        let stats = battery_stats(&[8.0]);
        assert_eq!(stats.mean, 8.0);
        assert_eq!(stats.std, 1.0);
    }

    #[test]
    fn t_score_formula() {
        let stats = BatteryStats {
            mean: 10.0,
            std: 2.0,
        };
        assert_eq!(t_score(8.0, &stats), 40.0);
        assert_eq!(t_score(12.0, &stats), 60.0);
        assert_eq!(t_score(10.0, &stats), 50.0);
    }

    #[test]
    fn singleton_cohort_t_is_50_everywhere() {
        // attempts=10, accuracy=80 for all batteries -> raw 8 each; alone in
        // the cohort the mean equals the candidate's own raw score.
        let target = candidate("R1", 10, 80.0);
        let cohort = vec![&target];
        let norm = normalize(&cohort, &target);
        for battery in Battery::ALL {
            assert_eq!(*norm.t_scores.get(battery), 50.0);
        }
        // sum(T) = 250, overall = 250 * 30 / 400
        assert_eq!(norm.overall, 18.75);
    }

    #[test]
    fn two_member_cohort_matches_worked_example() {
        // raws 8 and 12 -> mean 10, std 2 -> T = 40 and 60.
        let low = candidate("R1", 8, 100.0);
        let high = candidate("R2", 12, 100.0);
        let cohort = vec![&low, &high];

        let norm_low = normalize(&cohort, &low);
        let norm_high = normalize(&cohort, &high);
        for battery in Battery::ALL {
            assert_eq!(*norm_low.t_scores.get(battery), 40.0);
            assert_eq!(*norm_high.t_scores.get(battery), 60.0);
        }
        assert_eq!(*norm_low.battery_stats.get(Battery::Memory), BatteryStats {
            mean: 10.0,
            std: 2.0,
        });
    }

    #[test]
    fn t_scores_are_mean_centered_within_cohort() {
        let members = vec![
            candidate("R1", 5, 100.0),
            candidate("R2", 9, 100.0),
            candidate("R3", 14, 100.0),
            candidate("R4", 21, 100.0),
        ];
        let cohort: Vec<&CandidateRecord> = members.iter().collect();

        // Summed over all members, (T - 50) cancels out per battery.
        for battery in Battery::ALL {
            let total: f64 = members
                .iter()
                .map(|m| normalize(&cohort, m).t_scores.get(battery) - 50.0)
                .sum();
            assert!(total.abs() < 1e-9, "battery {battery}: residual {total}");
        }
    }

    #[test]
    fn overall_scales_linearly_with_t_sum() {
        let all_fifty = BatterySet::from_fn(|_| 50.0);
        assert_eq!(overall_score(&all_fifty), 18.75);

        let mixed = BatterySet {
            memory: 40.0,
            directions: 60.0,
            depth: 55.0,
            concentration: 45.0,
            perceptual: 50.0,
        };
        let expected = mixed.sum() * 30.0 / 400.0;
        assert_eq!(overall_score(&mixed), expected);
    }

    #[test]
    fn round2_is_reporting_precision() {
        assert_eq!(round2(18.75), 18.75);
        assert_eq!(round2(40.123_456), 40.12);
        assert_eq!(round2(40.125_1), 40.13);
    }
}
