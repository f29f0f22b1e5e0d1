// SPDX-License-Identifier: PMPL-1.0-or-later

//! Known-region discovery from an Xcode `project.pbxproj`.
//!
//! Xcode lists the project's localizations in a block such as
//!
//! ```text
//! knownRegions = (
//!     en,
//!     Base,
//!     fr,
//!     "zh-Hans",
//! );
//! ```
//!
//! Only the first block is read. `Base` and the source language `en` are not
//! translation targets and are dropped.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Language codes, kept sorted so prompts and logs are reproducible.
pub type LanguageSet = BTreeSet<String>;

pub const BASE_REGION: &str = "Base";
pub const SOURCE_REGION: &str = "en";

static KNOWN_REGIONS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)knownRegions\s*=\s*\((.*?)\);").expect("knownRegions pattern is valid")
});

static REGION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z_-]+)\b").expect("region token pattern is valid"));

/// Configured target languages, or an empty set when the project has no
/// `knownRegions` block.
pub fn extract_known_regions(project_text: &str) -> LanguageSet {
    let Some(block) = KNOWN_REGIONS_BLOCK
        .captures(project_text)
        .and_then(|caps| caps.get(1))
    else {
        tracing::warn!("no knownRegions block found in project file");
        return LanguageSet::new();
    };

    REGION_TOKEN
        .captures_iter(block.as_str())
        .filter_map(|caps| caps.get(1))
        .map(|token| token.as_str())
        .filter(|region| !is_excluded(region))
        .map(str::to_string)
        .collect()
}

fn is_excluded(region: &str) -> bool {
    region == BASE_REGION || region == SOURCE_REGION
}
