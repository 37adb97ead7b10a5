//! Error taxonomy for a santa run.

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

/// Every way a run can fail.
///
/// Glue code reports through `anyhow`; the failure is classified into one of
/// these kinds at the component boundary.
#[derive(Debug, Error)]
pub enum SantaError {
    #[error("invalid config: {0:#}")]
    Config(anyhow::Error),

    #[error("need at least 2 participants, got {count}")]
    TooFewParticipants { count: usize },

    #[error("duplicate participant name: {name}")]
    DuplicateName { name: String },

    #[error("Invalid email: {address} (participant {name})")]
    InvalidAddress { name: String, address: String },

    #[error("unsatisfiable constraints: {reason}")]
    Unsatisfiable { reason: String },

    #[error("write mail record {}: {source}", path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("render letter for {name}: {source:#}")]
    Render { name: String, source: anyhow::Error },

    #[error("send letter to {name}: {source:#}")]
    Transport { name: String, source: anyhow::Error },
}

impl SantaError {
    /// Exit status the CLI reports for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            SantaError::Config(_) => exit_codes::INVALID_CONFIG,
            SantaError::TooFewParticipants { .. }
            | SantaError::DuplicateName { .. }
            | SantaError::InvalidAddress { .. } => exit_codes::INVALID_ROSTER,
            SantaError::Unsatisfiable { .. } => exit_codes::UNSATISFIABLE,
            SantaError::Record { .. } | SantaError::Output(_) => exit_codes::RECORD,
            SantaError::Render { .. } | SantaError::Transport { .. } => exit_codes::DELIVERY,
        }
    }
}
