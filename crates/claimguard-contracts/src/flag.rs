//! Rule flag types.
//!
//! Every rule check produces exactly one `FlagResult`. The result carries a
//! `FlagType` tier that fixes the range its score may fall in; constructors
//! enforce that range so a malformed result can never reach the aggregator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClaimError, ClaimResult};

/// Score recorded on a failed crucial flag.
///
/// It is reported for audit visibility only and never summed: a crucial
/// failure raises the auto-reject signal instead.
pub const CRUCIAL_FAILURE_SCORE: u32 = 100;

/// Severity tier of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    /// Failure alone forces rejection.
    Crucial,
    /// Variable, context-dependent contribution (history, model).
    Flex,
    High,
    Medium,
    Low,
}

impl FlagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagType::Crucial => "crucial",
            FlagType::Flex => "flex",
            FlagType::High => "high",
            FlagType::Medium => "medium",
            FlagType::Low => "low",
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive score bounds for a failing flag of one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: u32,
    pub max: u32,
}

impl ScoreRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, score: u32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// The outcome of a single rule check.
///
/// Fields are private so the score/tier invariants established by the
/// constructors cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagResult {
    flag_type: FlagType,
    passed: bool,
    score: u32,
    name: String,
    message: String,
}

impl FlagResult {
    /// A check that did not fire. Score is always 0.
    pub fn pass(flag_type: FlagType, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            flag_type,
            passed: true,
            score: 0,
            name: name.into(),
            message: message.into(),
        }
    }

    /// A failed crucial check: fixed score, raises the reject signal.
    pub fn crucial_failure(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            flag_type: FlagType::Crucial,
            passed: false,
            score: CRUCIAL_FAILURE_SCORE,
            name: name.into(),
            message: message.into(),
        }
    }

    /// A scored, non-crucial result.
    ///
    /// A score of 0 yields a passing flag. Any other score must fall inside
    /// `range`, otherwise `ClaimError::ScoreOutOfRange` is returned.
    pub fn scored(
        flag_type: FlagType,
        score: u32,
        range: ScoreRange,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> ClaimResult<Self> {
        let name = name.into();
        if score == 0 {
            return Ok(Self::pass(flag_type, name, message));
        }
        if flag_type == FlagType::Crucial || !range.contains(score) {
            return Err(ClaimError::ScoreOutOfRange {
                flag_type,
                name,
                score,
                min: range.min,
                max: range.max,
            });
        }
        Ok(Self {
            flag_type,
            passed: false,
            score,
            name,
            message: message.into(),
        })
    }

    pub fn flag_type(&self) -> FlagType {
        self.flag_type
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when this is a crucial flag that failed.
    pub fn is_crucial_failure(&self) -> bool {
        self.flag_type == FlagType::Crucial && !self.passed
    }

    /// Flags that fired at all are kept in the claim's audit list.
    pub fn is_reportable(&self) -> bool {
        self.score > 0 || !self.passed
    }
}
