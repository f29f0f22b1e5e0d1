// SPDX-License-Identifier: PMPL-1.0-or-later

//! xcstrings-localizer: fill in missing translations in Apple string catalogs.
//!
//! Reads an `.xcstrings` catalog, works out which keys still lack a
//! translation for the languages the Xcode project declares, asks a
//! generative model for the missing strings in one structured-output call,
//! and merges the answer back into the catalog.
//!
//! PIPELINE:
//! 1. **Regions**: read `knownRegions` from `project.pbxproj`.
//! 2. **Catalog**: parse the catalog and find incomplete keys.
//! 3. **Translator**: one request, schema-constrained JSON back.
//! 4. **Merge**: fresh entries replace old ones by key; the file is
//!    rewritten atomically.

pub mod catalog;
pub mod config;
pub mod error;
pub mod localizer;
pub mod regions;
pub mod response;
pub mod storage;
pub mod translator;

pub use error::{LocalizerError, Result};
