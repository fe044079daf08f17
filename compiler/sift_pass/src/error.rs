//! Pass errors.

use sift_ir::TreeError;
use thiserror::Error;

/// Why a pass could not finish.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PassError {
    /// A rewrite produced a node the taxonomy rejects.
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("pass `{pass}` failed: {reason}")]
    Failed { pass: String, reason: String },
}

impl PassError {
    pub fn failed(pass: impl Into<String>, reason: impl Into<String>) -> Self {
        PassError::Failed {
            pass: pass.into(),
            reason: reason.into(),
        }
    }
}
