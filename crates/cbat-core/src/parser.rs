//! TOML submission parser.
//!
//! Loads candidate submissions from TOML files and validates them before
//! anything touches the store. Any missing or out-of-range value is
//! rejected as [`CoreError::MalformedInput`] with nothing written.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::error::CoreError;
use crate::model::{Battery, BatteryInput, BatterySet, CandidateRecord};
use crate::scoring::compute_raw_scores;

/// Intermediate TOML structure for submission files.
#[derive(Debug, Deserialize)]
struct TomlSubmissionFile {
    candidate: TomlCandidate,
    batteries: TomlBatteries,
}

#[derive(Debug, Deserialize)]
struct TomlCandidate {
    roll_no: String,
    is_reexam: bool,
    cbt2_marks: f64,
    rrb_zone: String,
    /// ISO date, `YYYY-MM-DD`.
    exam_date: String,
    shift: String,
}

#[derive(Debug, Deserialize)]
struct TomlBatteries {
    memory: TomlBatteryInput,
    directions: TomlBatteryInput,
    depth: TomlBatteryInput,
    concentration: TomlBatteryInput,
    perceptual: TomlBatteryInput,
}

#[derive(Debug, Deserialize)]
struct TomlBatteryInput {
    attempts: u32,
    accuracy: f64,
}

/// A validated submission, ready to become a [`CandidateRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub roll_no: String,
    pub is_reexam: bool,
    pub cbt2_marks: f64,
    pub rrb_zone: String,
    pub exam_date: NaiveDate,
    pub shift: String,
    pub batteries: BatterySet<BatteryInput>,
}

impl Submission {
    /// Materialize the submission as a record with raw scores computed.
    /// `created_at` is supplied by the caller: now for a fresh record, the
    /// original creation time for a confirmed overwrite.
    pub fn into_record(self, created_at: DateTime<Utc>) -> CandidateRecord {
        let mut record = CandidateRecord {
            roll_no: self.roll_no,
            is_reexam: self.is_reexam,
            cbt2_marks: self.cbt2_marks,
            rrb_zone: self.rrb_zone,
            exam_date: self.exam_date,
            shift: self.shift,
            batteries: self.batteries,
            raw_scores: None,
            created_at,
        };
        compute_raw_scores(&mut record);
        record
    }
}

/// Parse a submission TOML file.
pub fn parse_submission(path: &Path) -> Result<Submission, CoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CoreError::MalformedInput(format!("failed to read {}: {e}", path.display()))
    })?;
    parse_submission_str(&content)
}

/// Parse a submission from a TOML string (useful for testing).
pub fn parse_submission_str(content: &str) -> Result<Submission, CoreError> {
    let parsed: TomlSubmissionFile =
        toml::from_str(content).map_err(|e| CoreError::MalformedInput(e.to_string()))?;

    let exam_date = NaiveDate::parse_from_str(&parsed.candidate.exam_date, "%Y-%m-%d")
        .map_err(|e| {
            CoreError::MalformedInput(format!(
                "exam_date '{}' is not a YYYY-MM-DD date: {e}",
                parsed.candidate.exam_date
            ))
        })?;

    if parsed.candidate.roll_no.trim().is_empty() {
        return Err(CoreError::MalformedInput("roll_no must not be empty".into()));
    }

    let inputs = BatterySet {
        memory: validate_battery(Battery::Memory, &parsed.batteries.memory)?,
        directions: validate_battery(Battery::Directions, &parsed.batteries.directions)?,
        depth: validate_battery(Battery::Depth, &parsed.batteries.depth)?,
        concentration: validate_battery(Battery::Concentration, &parsed.batteries.concentration)?,
        perceptual: validate_battery(Battery::Perceptual, &parsed.batteries.perceptual)?,
    };

    Ok(Submission {
        roll_no: parsed.candidate.roll_no,
        is_reexam: parsed.candidate.is_reexam,
        cbt2_marks: parsed.candidate.cbt2_marks,
        rrb_zone: parsed.candidate.rrb_zone,
        exam_date,
        shift: parsed.candidate.shift,
        batteries: inputs,
    })
}

fn validate_battery(battery: Battery, input: &TomlBatteryInput) -> Result<BatteryInput, CoreError> {
    if !input.accuracy.is_finite() || !(0.0..=100.0).contains(&input.accuracy) {
        return Err(CoreError::MalformedInput(format!(
            "{battery} accuracy {} is outside 0-100",
            input.accuracy
        )));
    }
    Ok(BatteryInput {
        attempts: input.attempts,
        accuracy: input.accuracy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[candidate]
roll_no = "RRB2025001"
is_reexam = false
cbt2_marks = 92.5
rrb_zone = "Secunderabad"
exam_date = "2025-06-14"
shift = "morning"

[batteries.memory]
attempts = 42
accuracy = 85.5

[batteries.directions]
attempts = 30
accuracy = 90.0

[batteries.depth]
attempts = 25
accuracy = 72.0

[batteries.concentration]
attempts = 55
accuracy = 80.0

[batteries.perceptual]
attempts = 38
accuracy = 95.0
"#;

    #[test]
    fn parse_valid_submission() {
        let submission = parse_submission_str(VALID).unwrap();
        assert_eq!(submission.roll_no, "RRB2025001");
        assert_eq!(
            submission.exam_date,
            NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
        );
        assert_eq!(submission.batteries.memory.attempts, 42);
        assert_eq!(submission.batteries.perceptual.accuracy, 95.0);
    }

    #[test]
    fn into_record_computes_raw_scores() {
        let record = parse_submission_str(VALID).unwrap().into_record(Utc::now());
        let raws = record.raw_scores.unwrap();
        // 42 * 85.5 / 100 = 35.91 -> 35
        assert_eq!(raws.memory, 35.0);
        // 30 * 90 / 100 = 27
        assert_eq!(raws.directions, 27.0);
    }

    #[test]
    fn missing_battery_is_malformed() {
        let truncated = VALID.replace("[batteries.perceptual]", "[batteries.extra]");
        let err = parse_submission_str(&truncated).unwrap_err();
        assert!(matches!(err, CoreError::MalformedInput(_)));
    }

    #[test]
    fn non_numeric_attempts_is_malformed() {
        let bad = VALID.replace("attempts = 42", "attempts = \"many\"");
        let err = parse_submission_str(&bad).unwrap_err();
        assert!(matches!(err, CoreError::MalformedInput(_)));
    }

    #[test]
    fn accuracy_out_of_range_is_malformed() {
        let bad = VALID.replace("accuracy = 85.5", "accuracy = 130.0");
        let err = parse_submission_str(&bad).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("memory"), "unexpected message: {msg}");
        assert!(msg.contains("0-100"), "unexpected message: {msg}");
    }

    #[test]
    fn bad_date_is_malformed() {
        let bad = VALID.replace("2025-06-14", "14-06-2025");
        let err = parse_submission_str(&bad).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn empty_roll_no_is_malformed() {
        let bad = VALID.replace("\"RRB2025001\"", "\"  \"");
        let err = parse_submission_str(&bad).unwrap_err();
        assert!(err.to_string().contains("roll_no"));
    }
}
