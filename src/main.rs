use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use profilefinder::cli::Cli;
use profilefinder::company_list;
use profilefinder::config::{AppConfig, ConfigError};
use profilefinder::{RankedCandidate, Resolver, SearchClient};

/// One company's resolution result, as written to the JSON report.
#[derive(Serialize)]
struct CompanyReport {
    company: String,
    candidates: Vec<RankedCandidate>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(msg) = cli.validate() {
        eprintln!("Error: {}", msg);
        std::process::exit(2);
    }

    // Handle --init first (before any other processing)
    if cli.init {
        match AppConfig::create_default_config() {
            Ok(path) => {
                println!("✅ Created default configuration file at: {}", path.display());
                println!("   Edit this file to customize settings, then run profilefinder again.");
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("❌ Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Load configuration
    let app_config = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(ConfigError::FileNotFound(path)) => {
            // Config not found - prompt to create if interactive
            match AppConfig::prompt_create_config() {
                Ok(Some(created_path)) => {
                    println!(
                        "✅ Created default configuration file at: {}",
                        created_path.display()
                    );
                    println!(
                        "   Edit this file to customize settings, then run profilefinder again."
                    );
                    std::process::exit(0);
                }
                Ok(None) => {
                    eprintln!("❌ Configuration file not found at: {}", path.display());
                    eprintln!("   Run with --init to create a default configuration file.");
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("❌ Failed to create configuration file: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose);

    let search = SearchClient::new(&app_config).context("failed to build HTTP client")?;
    let mut resolver = Resolver::from_config(&app_config);
    if let Some(top) = cli.top {
        resolver = resolver.with_max_candidates(top);
    }

    let companies: Vec<String> = match (&cli.company, &cli.input) {
        (Some(name), _) => vec![name.clone()],
        (None, Some(input)) => company_list::read_company_list(Path::new(input))
            .with_context(|| format!("failed to read company list from {}", input))?,
        (None, None) => Vec::new(),
    };

    info!("resolving {} companies", companies.len());

    // Sequential by design: one bounded search request per company, no
    // internal concurrency, pacing left to the caller.
    let mut reports = Vec::with_capacity(companies.len());
    for (idx, name) in companies.iter().enumerate() {
        let candidates = resolver.resolve(name, &search).await;
        match candidates.first() {
            Some(best) => info!(
                "[{:03}] {} -> {} (score {:.2}, {} candidates)",
                idx + 1,
                name,
                best.url,
                best.score.total,
                candidates.len()
            ),
            None => info!("[{:03}] {} -> no candidates", idx + 1, name),
        }
        reports.push(CompanyReport {
            company: name.clone(),
            candidates,
        });
    }

    let json = serde_json::to_string_pretty(&reports).context("failed to serialize report")?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write report to {}", path))?;
            info!("wrote {} company reports to {}", reports.len(), path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let directives = match verbose {
        0 => "profilefinder=info",
        1 => "profilefinder=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
