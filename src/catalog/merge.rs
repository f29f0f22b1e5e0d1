// SPDX-License-Identifier: PMPL-1.0-or-later

//! Combining catalogs.

use super::model::Catalog;

/// Left fold over `catalogs`, unioning their entries by key.
///
/// When a key appears more than once the entry from the later catalog
/// replaces the earlier one whole; localizations are not merged field by
/// field. Only entries are combined: the result always carries the default
/// `sourceLanguage` and `version`.
pub fn merge<I>(catalogs: I) -> Catalog
where
    I: IntoIterator<Item = Catalog>,
{
    catalogs
        .into_iter()
        .fold(Catalog::new(), |mut merged, catalog| {
            merged.entries.extend(catalog.entries);
            merged
        })
}
