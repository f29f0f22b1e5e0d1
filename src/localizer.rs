// SPDX-License-Identifier: PMPL-1.0-or-later

//! The translate-and-merge pipeline.
//!
//! load catalog → read project → extract languages → incomplete keys →
//! translate → build catalog → merge → serialize → atomic write.
//!
//! Nothing touches the catalog file until the merged catalog has been
//! serialized in memory, so any failure along the way leaves it as it was.

use crate::catalog::{self, Catalog};
use crate::config::LocalizerConfig;
use crate::error::Result;
use crate::regions::{extract_known_regions, LanguageSet};
use crate::storage;
use crate::translator::Translator;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Keys still missing translations, and the languages they are missing in.
#[derive(Debug, Clone)]
pub struct PendingWork {
    pub catalog: Catalog,
    pub keys: BTreeSet<String>,
    pub languages: LanguageSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every key is already complete; the service was not called.
    NothingToTranslate,
    /// The catalog was rewritten with fresh translations for `keys`.
    Translated {
        keys: BTreeSet<String>,
        languages: LanguageSet,
    },
}

/// Read the catalog and project file and work out what needs translating.
pub fn pending(config: &LocalizerConfig) -> Result<PendingWork> {
    let catalog_path = config.catalog_path()?;
    let catalog = Catalog::parse(&storage::read_text(catalog_path)?)?;
    debug!(path = %catalog_path.display(), keys = catalog.len(), "catalog loaded");

    let project_path = config.project_path()?;
    let languages = extract_known_regions(&storage::read_text(project_path)?);
    debug!(?languages, "configured languages");

    let keys = catalog.incomplete_keys(&languages);
    info!(incomplete = keys.len(), total = catalog.len(), "scanned catalog");

    Ok(PendingWork {
        catalog,
        keys,
        languages,
    })
}

/// Run the whole pipeline.
///
/// `connect` builds the translator and is only invoked once there is
/// something to translate, so a run with nothing pending needs no credential
/// and makes no request.
pub fn run<T, F>(config: &LocalizerConfig, connect: F) -> Result<RunOutcome>
where
    T: Translator,
    F: FnOnce(&LocalizerConfig) -> Result<T>,
{
    let work = pending(config)?;
    if work.keys.is_empty() {
        return Ok(RunOutcome::NothingToTranslate);
    }

    let translator = connect(config)?;
    let response = translator.translate(&work.keys, &work.languages)?;
    info!(entries = response.entries.len(), "translations received");

    let translated = Catalog::from_translation_response(&response, &work.languages);
    let merged = catalog::merge([work.catalog, translated]);
    let serialized = merged.serialize()?;

    let catalog_path = config.catalog_path()?;
    storage::write_atomic(catalog_path, &serialized)?;
    info!(path = %catalog_path.display(), "catalog written");

    Ok(RunOutcome::Translated {
        keys: work.keys,
        languages: work.languages,
    })
}
