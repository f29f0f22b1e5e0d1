// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error taxonomy for the localizer library.
//!
//! The binary wraps these in `anyhow` at the edge; inside the library every
//! failure is one of the variants below so callers can tell a missing setting
//! (print and stop) apart from a malformed payload or a failed service call.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalizerError {
    /// A required path or credential was not supplied.
    #[error("{0}")]
    ConfigurationMissing(String),

    /// Catalog text or service payload does not match the expected shape.
    #[error("invalid {what}: {source}")]
    Format {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The generative service could not be reached or answered badly.
    #[error("translation service failed: {0}")]
    ExternalService(String),

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LocalizerError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(what: &'static str, source: serde_json::Error) -> Self {
        Self::Format { what, source }
    }

    /// True for the "cannot proceed" outcomes that should print and exit cleanly.
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, Self::ConfigurationMissing(_))
    }
}

pub type Result<T> = std::result::Result<T, LocalizerError>;
