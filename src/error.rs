// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types and operation outcomes.

/// Application error type for operations that genuinely fail.
///
/// Expected "nothing to do" paths (no stored user, unknown id) are not
/// errors; they are reported as [`Outcome::Skipped`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Whether an operation changed state or was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an Outcome reports whether the operation was applied"]
pub enum Outcome {
    Applied,
    Skipped(SkipReason),
}

/// Why an operation was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No user aggregate is stored.
    MissingUser,
    /// The referenced id does not exist.
    NotFound(String),
    /// The program is already in the user's active programs.
    AlreadyEnrolled(String),
    /// An item with this id is already stored.
    Duplicate(String),
    /// The reminder is disabled.
    Disabled,
    /// The reminder has no weekdays to fire on.
    NoScheduledDays,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn is_skipped(&self) -> bool {
        !self.is_applied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_predicates() {
        assert!(Outcome::Applied.is_applied());
        assert!(Outcome::Skipped(SkipReason::MissingUser).is_skipped());
    }

    #[test]
    fn test_internal_error_from_anyhow() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "Internal error: boom");
    }
}
