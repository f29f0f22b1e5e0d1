// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run configuration.
//!
//! Built once by the binary from flags, the environment, and an optional
//! `.env` file, then handed to the pipeline by reference.

use crate::error::{LocalizerError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CATALOG_PATH_ENV: &str = "XCSTRINGS_PATH";
pub const PROJECT_PATH_ENV: &str = "PBXPROJ_PATH";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const ENDPOINT_ENV: &str = "GEMINI_ENDPOINT";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct LocalizerConfig {
    pub catalog_path: Option<PathBuf>,
    pub project_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            project_path: None,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LocalizerConfig {
    pub fn catalog_path(&self) -> Result<&Path> {
        self.catalog_path.as_deref().ok_or_else(|| {
            LocalizerError::ConfigurationMissing(format!(
                "Provide a path to an .xcstrings file using the {} environment variable or command-line arguments.",
                CATALOG_PATH_ENV
            ))
        })
    }

    pub fn project_path(&self) -> Result<&Path> {
        self.project_path.as_deref().ok_or_else(|| {
            LocalizerError::ConfigurationMissing(format!(
                "Provide a path to the .pbxproj file within the .xcodeproj file using the {} environment variable or --project.",
                PROJECT_PATH_ENV
            ))
        })
    }

    /// The service credential; blank values count as missing.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                LocalizerError::ConfigurationMissing(format!(
                    "Provide a Gemini API key using the {} environment variable or --api-key.",
                    API_KEY_ENV
                ))
            })
    }
}
