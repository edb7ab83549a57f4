//! Mapping XSD CLI
//!
//! Inspect the mapping XSD registry, identify mapping documents and manage
//! bootstrap configuration.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use mapping_bootstrap::scan::scan_directory;
use mapping_bootstrap::xsd::DirectoryXsdResolver;
use mapping_bootstrap::{BootstrapConfig, Checksum, MappingDocumentHeader, MappingXsdSupport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mapping-xsd")]
#[command(about = "Inspect mapping XSDs and identify mapping documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known XSD descriptors
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the descriptor for an orm.xml version
    Resolve {
        /// Version label, e.g. 2.2
        version: String,
    },

    /// Identify the XSD of a mapping document
    Identify {
        file: PathBuf,
    },

    /// Scan a directory for mapping documents
    Scan {
        dir: PathBuf,
    },

    /// Load every XSD from a resource root and print checksums
    Verify {
        /// Resource root (defaults to xsd.resource_root from config)
        root: Option<PathBuf>,

        /// Pinned checksum as RESOURCE=SHA256, repeatable
        #[arg(long = "expect", value_name = "RESOURCE=SHA256")]
        expect: Vec<String>,
    },

    /// Show or initialise configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show {
        /// Config file to load (optional)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Write a default config file
    Init {
        #[arg(short, long, default_value = "bootstrap.toml")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let support = MappingXsdSupport::shared();

    match cli.command {
        Commands::List { json } => {
            if json {
                let all: Vec<_> = support.descriptors().collect();
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else {
                let latest = support.latest_descriptor();
                for d in support.descriptors() {
                    let marker = if std::ptr::eq(d, latest) { " (latest)" } else { "" };
                    println!(
                        "{:<5} {:<48} {}{}",
                        d.version(),
                        d.namespace_uri(),
                        d.resource(),
                        marker
                    );
                }
            }
        }

        Commands::Resolve { version } => {
            let descriptor = support.descriptor_for_version(&version)?;
            println!("{}", descriptor);
            if support.is_version_namespace_ambiguous(descriptor.namespace_uri()) {
                println!(
                    "  note: namespace shared with another version; \
                     documents need a version attribute"
                );
            }
        }

        Commands::Identify { file } => {
            let header = MappingDocumentHeader::read(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let descriptor = support.identify(&header)?;
            println!("{}: {}", file.display(), descriptor);
        }

        Commands::Scan { dir } => {
            let report = scan_directory(&dir, support);
            for found in &report.found {
                println!(
                    "✅ {} -> {} ({})",
                    found.path.display(),
                    found.descriptor.version(),
                    found.descriptor.namespace_uri()
                );
            }
            for (path, error) in &report.failures {
                println!("❌ {} - {}", path.display(), error);
            }
            println!();
            println!(
                "{} mapping document(s), {} failure(s)",
                report.found.len(),
                report.failures.len()
            );
            if !report.is_clean() {
                std::process::exit(1);
            }
        }

        Commands::Verify { root, expect } => {
            let pinned = parse_pins(&expect)?;
            let resolver = match root {
                Some(root) => DirectoryXsdResolver::new(root),
                None => match BootstrapConfig::load()?.xsd_resolver() {
                    Some(resolver) => resolver,
                    None => bail!("no resource root given and xsd.resource_root is not configured"),
                },
            };

            let mut failed = 0;
            for descriptor in support.descriptors() {
                let checked = support.load(descriptor, &resolver).and_then(|loaded| {
                    if let Some(expected) = pinned.get(descriptor.resource()) {
                        loaded.verify(expected)?;
                    }
                    Ok(loaded)
                });
                match checked {
                    Ok(loaded) => println!("✅ {}  {}", loaded.checksum, descriptor.resource()),
                    Err(e) => {
                        failed += 1;
                        println!("❌ {} - {}", descriptor.resource(), e);
                    }
                }
            }
            if failed > 0 {
                std::process::exit(1);
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show { config } => {
                let cfg = BootstrapConfig::load_from(config.as_deref())?;
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
            ConfigAction::Init { output } => {
                BootstrapConfig::default().save(&output)?;
                println!("✅ Created config file: {}", output);
            }
        },
    }

    Ok(())
}

/// Parse `RESOURCE=SHA256` pins given to `verify --expect`
fn parse_pins(pins: &[String]) -> anyhow::Result<HashMap<String, Checksum>> {
    pins.iter()
        .map(|pin| match pin.split_once('=') {
            Some((resource, sha)) if !resource.is_empty() && !sha.is_empty() => {
                Ok((resource.to_string(), Checksum::from(sha)))
            }
            _ => bail!("invalid --expect value '{}', expected RESOURCE=SHA256", pin),
        })
        .collect()
}
