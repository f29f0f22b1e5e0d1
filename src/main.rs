// SPDX-License-Identifier: PMPL-1.0-or-later

//! xcstrings-localizer: fill missing string-catalog translations with Gemini
//!
//! Finds the keys of an `.xcstrings` catalog that lack a translation for one of
//! the project's known regions, requests them in a single structured-output
//! call, and writes the merged catalog back in place.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use xcstrings_localizer::config::{self, LocalizerConfig};
use xcstrings_localizer::localizer::{self, RunOutcome};
use xcstrings_localizer::regions;
use xcstrings_localizer::storage;
use xcstrings_localizer::translator::GeminiTranslator;

#[derive(Parser)]
#[command(name = "xcstrings-localizer")]
#[command(version)]
#[command(about = "Fill missing translations in Apple string catalogs with a generative model")]
#[command(long_about = None)]
struct Cli {
    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate incomplete keys and rewrite the catalog
    Translate {
        #[command(flatten)]
        paths: PathArgs,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Gemini model identifier
        #[arg(short, long, env = "GEMINI_MODEL", default_value = config::DEFAULT_MODEL)]
        model: String,

        /// Base URL of the Gemini API
        #[arg(long, env = "GEMINI_ENDPOINT", default_value = config::DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Request timeout in seconds
        #[arg(long, default_value = "120")]
        timeout: u64,

        /// List the keys that would be translated without calling the service
        #[arg(long)]
        dry_run: bool,
    },

    /// List keys that are missing a translation
    Pending {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Print the target languages declared in a project file
    Regions {
        /// Path to project.pbxproj
        #[arg(value_name = "PROJECT")]
        project: PathBuf,
    },
}

#[derive(Args)]
struct PathArgs {
    /// String catalog to update
    #[arg(value_name = "CATALOG", env = "XCSTRINGS_PATH")]
    catalog: Option<PathBuf>,

    /// project.pbxproj declaring the known regions
    #[arg(short, long, env = "PBXPROJ_PATH")]
    project: Option<PathBuf>,
}

impl PathArgs {
    fn into_config(self) -> LocalizerConfig {
        LocalizerConfig {
            catalog_path: self.catalog,
            project_path: self.project,
            ..LocalizerConfig::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Translate {
            paths,
            api_key,
            model,
            endpoint,
            timeout,
            dry_run,
        } => {
            let config = LocalizerConfig {
                api_key,
                model,
                endpoint,
                timeout: Duration::from_secs(timeout),
                ..paths.into_config()
            };
            if dry_run {
                print_pending(&config)
            } else {
                translate(&config)
            }
        }

        Commands::Pending { paths } => print_pending(&paths.into_config()),

        Commands::Regions { project } => storage::read_text(&project).map(|text| {
            let languages = regions::extract_known_regions(&text);
            if languages.is_empty() {
                println!("No known regions found in {}", project.display());
            }
            for language in &languages {
                println!("{}", language);
            }
        }),
    };

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.is_configuration_missing() => {
            println!("{}", err);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn translate(config: &LocalizerConfig) -> xcstrings_localizer::Result<()> {
    match localizer::run(config, GeminiTranslator::from_config)? {
        RunOutcome::NothingToTranslate => println!("No keys left to localize."),
        RunOutcome::Translated { keys, languages } => {
            println!(
                "{} {} keys into {} languages",
                "Translated".green().bold(),
                keys.len(),
                languages.len()
            );
            if let Some(path) = &config.catalog_path {
                println!("Catalog saved to: {}", path.display());
            }
        }
    }
    Ok(())
}

fn print_pending(config: &LocalizerConfig) -> xcstrings_localizer::Result<()> {
    let work = localizer::pending(config)?;
    if work.keys.is_empty() {
        println!("No keys left to localize.");
        return Ok(());
    }

    let languages: Vec<&str> = work.languages.iter().map(String::as_str).collect();
    if languages.is_empty() {
        println!(
            "{} no known regions; listing keys without any localization",
            "note:".yellow()
        );
    } else {
        println!("Languages: {}", languages.join(", "));
    }
    println!("Keys needing translation: {}", work.keys.len());
    for key in &work.keys {
        println!("  - {}", key);
    }
    Ok(())
}
