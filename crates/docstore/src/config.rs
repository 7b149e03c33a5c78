//! Pipeline configuration types.

use serde::{Deserialize, Serialize};

/// Default maximum number of records submitted in one insert operation.
pub const DEFAULT_MAX_BATCH: usize = 10_000;

/// How a pipeline reacts to a failed operation.
///
/// The original scripts this toolkit replaces aborted on the first error as
/// an accident of control flow; here it is a named policy passed to both
/// pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Abort the whole run on the first failure. Work already committed is
    /// left in place; nothing is rolled back or retried.
    #[default]
    FailFast,
    /// Record the failure in the run summary and continue with the next
    /// collection, index, or batch.
    BestEffort,
}

impl std::str::FromStr for FailureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail_fast" | "fail-fast" => Ok(Self::FailFast),
            "best_effort" | "best-effort" => Ok(Self::BestEffort),
            other => Err(format!("unknown failure mode `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_mode_from_str() {
        assert_eq!("fail_fast".parse(), Ok(FailureMode::FailFast));
        assert_eq!("best-effort".parse(), Ok(FailureMode::BestEffort));
        assert!("retry".parse::<FailureMode>().is_err());
    }
}
