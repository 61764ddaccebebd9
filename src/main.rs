use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

mod analyzers;
mod ast;
mod cache;
mod core;
mod logging;
mod project;

use crate::analyzers::{CountImportsAnalyzer, MatchImportsAnalyzer};
use crate::ast::TreeSitterAstProvider;
use crate::cache::DiskCacheStore;
use crate::core::{AnalyzerConfig, AnalyzerDriver, Collaborators};
use crate::logging::ConsoleLogger;
use crate::project::{GatherFilesConfig, ManifestMetaProvider, WalkdirGatherer};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pairscan",
    version = "0.1.0",
    author = "pairscan developers",
    about = "Cached, compatibility-gated AST analysis over project pairs"
)]
struct Cli {
    /// Target project directory (must contain package.json)
    #[arg(short, long, value_name = "PATH")]
    target: PathBuf,

    /// Reference project directory the target should depend on
    #[arg(short, long, value_name = "PATH")]
    reference: Option<PathBuf>,

    /// Analyzer to run
    #[arg(short, long, value_name = "ANALYZER", value_enum, default_value_t = AnalyzerKind::CountImports)]
    analyzer: AnalyzerKind,

    /// Comma-separated list of file extensions to gather
    #[arg(
        short,
        long,
        value_name = "EXTS",
        value_delimiter = ',',
        default_value = "js,mjs,cjs"
    )]
    extensions: Vec<String>,

    /// Cache directory (defaults to a temp-dir cache)
    #[arg(long, value_name = "PATH")]
    cache_dir: Option<PathBuf>,

    /// Output file path for the result JSON
    #[arg(short, long, value_name = "FILE", default_value = "pairscan.json")]
    output: PathBuf,

    /// Skip the target/reference compatibility check
    #[arg(long)]
    skip_compat_check: bool,

    /// Print debug output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum AnalyzerKind {
    CountImports,
    MatchImports,
}

impl AnalyzerKind {
    fn as_str(self) -> &'static str {
        match self {
            AnalyzerKind::CountImports => "count-imports",
            AnalyzerKind::MatchImports => "match-imports",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        target,
        reference,
        analyzer,
        extensions,
        cache_dir,
        output,
        skip_compat_check,
        verbose,
    } = cli;

    let start_time = Instant::now();

    let normalized_extensions: Vec<String> = extensions
        .into_iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_string())
        .filter(|ext| !ext.is_empty())
        .collect();

    println!("PAIRSCAN - Project Pair Analysis");
    println!("Target: {}", target.display());
    if let Some(reference) = &reference {
        println!("Reference: {}", reference.display());
    }
    println!("Analyzer: {}", analyzer.as_str());
    println!("Extensions: {:?}", normalized_extensions);

    let config = AnalyzerConfig {
        target_project_path: Some(target),
        reference_project_path: reference,
        gather_files_config: GatherFilesConfig {
            extensions: normalized_extensions,
            allowlist: None,
        },
        skip_check_match_compatibility: skip_compat_check,
        ..AnalyzerConfig::default()
    };

    let meta_provider = ManifestMetaProvider::new();
    let gatherer = WalkdirGatherer::new();
    let ast_provider = TreeSitterAstProvider::new();
    let cache = DiskCacheStore::new(cache_dir);
    let logger = ConsoleLogger::new(verbose);

    let collaborators = Collaborators {
        project_meta: &meta_provider,
        gatherer: &gatherer,
        ast: &ast_provider,
        cache: &cache,
        logger: &logger,
    };

    let result = match analyzer {
        AnalyzerKind::CountImports => {
            AnalyzerDriver::new(CountImportsAnalyzer::new(), collaborators).execute(config)?
        }
        AnalyzerKind::MatchImports => {
            AnalyzerDriver::new(MatchImportsAnalyzer::new(), collaborators).execute(config)?
        }
    };

    let cached = result.analyzer_meta.from_cache;
    fs::write(&output, serde_json::to_string_pretty(&result)?)?;

    println!(
        "Completed in {:.2}s{} -> {}",
        start_time.elapsed().as_secs_f64(),
        if cached { " (from cache)" } else { "" },
        output.display()
    );

    Ok(())
}
