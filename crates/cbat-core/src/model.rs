//! Core data model types for cbat.
//!
//! These are the fundamental types that the entire cbat system uses to
//! represent candidates, battery inputs, and derived scores.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five fixed test batteries of the aptitude exam.
///
/// The battery set is closed: the scoring formulas, report views, and CSV
/// columns are all defined over exactly these five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Battery {
    Memory,
    Directions,
    Depth,
    Concentration,
    Perceptual,
}

impl Battery {
    /// All batteries, in canonical reporting order.
    pub const ALL: [Battery; 5] = [
        Battery::Memory,
        Battery::Directions,
        Battery::Depth,
        Battery::Concentration,
        Battery::Perceptual,
    ];

    /// Capitalized name used in CSV column headers (e.g. "Memory").
    pub fn column_name(&self) -> &'static str {
        match self {
            Battery::Memory => "Memory",
            Battery::Directions => "Directions",
            Battery::Depth => "Depth",
            Battery::Concentration => "Concentration",
            Battery::Perceptual => "Perceptual",
        }
    }
}

impl fmt::Display for Battery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Battery::Memory => write!(f, "memory"),
            Battery::Directions => write!(f, "directions"),
            Battery::Depth => write!(f, "depth"),
            Battery::Concentration => write!(f, "concentration"),
            Battery::Perceptual => write!(f, "perceptual"),
        }
    }
}

impl FromStr for Battery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Battery::Memory),
            "directions" => Ok(Battery::Directions),
            "depth" => Ok(Battery::Depth),
            "concentration" => Ok(Battery::Concentration),
            "perceptual" => Ok(Battery::Perceptual),
            other => Err(format!("unknown battery: {other}")),
        }
    }
}

/// One value per battery.
///
/// Used for inputs (`BatterySet<BatteryInput>`), raw scores
/// (`BatterySet<f64>`), T-scores, and per-battery cohort statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatterySet<T> {
    pub memory: T,
    pub directions: T,
    pub depth: T,
    pub concentration: T,
    pub perceptual: T,
}

impl<T> BatterySet<T> {
    /// Build a set by evaluating `f` for each battery.
    pub fn from_fn(mut f: impl FnMut(Battery) -> T) -> Self {
        Self {
            memory: f(Battery::Memory),
            directions: f(Battery::Directions),
            depth: f(Battery::Depth),
            concentration: f(Battery::Concentration),
            perceptual: f(Battery::Perceptual),
        }
    }

    pub fn get(&self, battery: Battery) -> &T {
        match battery {
            Battery::Memory => &self.memory,
            Battery::Directions => &self.directions,
            Battery::Depth => &self.depth,
            Battery::Concentration => &self.concentration,
            Battery::Perceptual => &self.perceptual,
        }
    }

    pub fn get_mut(&mut self, battery: Battery) -> &mut T {
        match battery {
            Battery::Memory => &mut self.memory,
            Battery::Directions => &mut self.directions,
            Battery::Depth => &mut self.depth,
            Battery::Concentration => &mut self.concentration,
            Battery::Perceptual => &mut self.perceptual,
        }
    }

    /// Build a new set by mapping each battery's value.
    pub fn map<U>(&self, mut f: impl FnMut(Battery, &T) -> U) -> BatterySet<U> {
        BatterySet::from_fn(|b| f(b, self.get(b)))
    }
}

impl BatterySet<f64> {
    /// Sum across all five batteries.
    pub fn sum(&self) -> f64 {
        Battery::ALL.iter().map(|b| *self.get(*b)).sum()
    }
}

/// Per-battery submission input: how many questions were attempted and
/// with what accuracy (percentage, 0–100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryInput {
    pub attempts: u32,
    pub accuracy: f64,
}

/// One candidate's record, keyed by roll number.
///
/// `raw_scores` is derived data: always recomputable from `batteries`,
/// cached once computed, and recomputed only when missing or on a
/// confirmed resubmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Globally unique roll number, immutable once assigned.
    pub roll_no: String,
    /// Whether this candidate sat a re-exam.
    pub is_reexam: bool,
    /// CBT2 marks. Informational only; never used in scoring.
    pub cbt2_marks: f64,
    /// RRB zone the candidate belongs to.
    pub rrb_zone: String,
    /// Date the exam was taken.
    pub exam_date: NaiveDate,
    /// Exam shift within the day.
    pub shift: String,
    /// Per-battery attempts and accuracy as submitted.
    pub batteries: BatterySet<BatteryInput>,
    /// Derived raw scores; `None` until computed.
    #[serde(default)]
    pub raw_scores: Option<BatterySet<f64>>,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
}

impl CandidateRecord {
    /// Whether `other` falls in the same comparison group: exact
    /// (rrb_zone, shift) equality, nothing fuzzy.
    pub fn same_zone_shift(&self, other: &CandidateRecord) -> bool {
        self.rrb_zone == other.rrb_zone && self.shift == other.shift
    }
}
