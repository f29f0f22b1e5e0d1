// SPDX-License-Identifier: PMPL-1.0-or-later

//! String catalog model and merging.
//!
//! An `.xcstrings` file maps each source key to per-language string units:
//!
//! ```json
//! {
//!   "sourceLanguage": "en",
//!   "strings": {
//!     "hello": {
//!       "localizations": {
//!         "fr": { "stringUnit": { "state": "translated", "value": "Bonjour" } }
//!       }
//!     }
//!   },
//!   "version": "1.0"
//! }
//! ```

mod merge;
mod model;

pub use merge::merge;
pub use model::{
    Catalog, CatalogEntry, Localization, LocalizedUnit, UnitState, DEFAULT_SOURCE_LANGUAGE,
    DEFAULT_VERSION,
};
