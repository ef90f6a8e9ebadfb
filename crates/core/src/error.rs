// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use homebook_domain::{DomainError, SessionId, Step};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The input belongs to a different wizard step.
    NotEditableInStep {
        /// The input that was attempted.
        input: &'static str,
        /// The step the session is currently in.
        step: Step,
    },
    /// The operation is only valid at the confirmation step.
    NotAtConfirmation {
        /// The step the session is currently in.
        step: Step,
    },
    /// A confirmation was applied to a session it was not produced for.
    SessionMismatch {
        /// The session being transitioned.
        expected: SessionId,
        /// The session named by the confirmation.
        actual: SessionId,
    },
    /// The draft changed after it was frozen for submission.
    DraftChanged,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NotEditableInStep { input, step } => {
                write!(f, "'{input}' cannot be changed in step {step}")
            }
            Self::NotAtConfirmation { step } => {
                write!(f, "Operation requires the confirmation step, session is in step {step}")
            }
            Self::SessionMismatch { expected, actual } => {
                write!(
                    f,
                    "Confirmation for session {actual} cannot be applied to session {expected}"
                )
            }
            Self::DraftChanged => write!(f, "The draft changed after it was submitted"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
