//! Status lines for operation feedback.

use std::fmt;

use jiff::SignedDuration;

use super::datetime::HumanDuration;

/// One-line confirmation or failure message.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "✓" } else { "✗" }, self.message)
    }
}

/// State of the plan cache as reported by `cache status`.
pub struct CacheStatus {
    /// Age of the stored snapshot, `None` when there is no fresh snapshot
    pub age: Option<SignedDuration>,
    pub ttl: SignedDuration,
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.age {
            None => writeln!(f, "Plan cache: empty"),
            Some(age) => writeln!(
                f,
                "Plan cache: fresh (saved {} ago, expires in {})",
                HumanDuration(age),
                HumanDuration(self.ttl - age)
            ),
        }
    }
}
