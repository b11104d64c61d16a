//! Estimate Bridge CLI - runs a G-code time estimator as a post-process step
//!
//! Acts as a minimal slicer host: feeds G-code lines to the post-process
//! adapter and writes back what the estimator produced.

mod logging;
mod settings;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tabled::{Table, Tabled};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

use estimate_core::domain::PluginDescriptor;
use estimate_core::{LineStream, PostProcessor};
use estimate_infra_system::SubprocessRunner;

use crate::settings::{load_settings, SettingsOverrides};

#[derive(Parser)]
#[command(name = "estimate-bridge")]
#[command(about = "Run a G-code time estimator as a slicer post-process step", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Post-process G-code through the estimator
    Run {
        /// Input G-code file (default: stdin)
        #[arg(short, long)]
        input: Option<String>,

        /// Output G-code file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Settings file (TOML or JSON)
        #[arg(long, env = "ESTIMATE_BRIDGE_SETTINGS")]
        settings: Option<String>,

        /// Path to the estimator binary
        #[arg(long)]
        path: Option<String>,

        /// Kind of config to use (file or moonraker_url)
        #[arg(long)]
        config_kind: Option<String>,

        /// Config argument: path for file, URL for Moonraker
        #[arg(long)]
        config_arg: Option<String>,
    },

    /// Print the plugin descriptor registered with the host
    Describe {
        /// Emit the host's JSON settings block
        #[arg(long)]
        json: bool,
    },
}

#[derive(Tabled)]
struct SettingRow {
    key: String,
    label: String,
    description: String,
    default: String,
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Host-side split: lines without terminators
fn split_host_lines(contents: &str) -> LineStream {
    contents.lines().collect()
}

/// Returned lines already carry their terminators
fn join_returned_lines(lines: &LineStream) -> String {
    lines.lines().concat()
}

async fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut contents = String::new();
            tokio::io::stdin()
                .read_to_string(&mut contents)
                .await
                .context("Failed to read stdin")?;
            Ok(contents)
        }
    }
}

async fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(contents.as_bytes())
                .await
                .context("Failed to write stdout")?;
            stdout.flush().await.context("Failed to flush stdout")
        }
    }
}

async fn run(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    settings_file: Option<PathBuf>,
    overrides: SettingsOverrides,
) -> Result<()> {
    let settings = load_settings(settings_file.as_deref(), overrides)
        .context("Failed to load estimator settings")?;

    let lines = split_host_lines(&read_input(input.as_deref()).await?);
    info!(lines = lines.len(), estimator = %settings.path, "Post-processing G-code");

    let processor = PostProcessor::new(Arc::new(SubprocessRunner::new()), settings);
    let rewritten = processor.execute(lines).await?;

    write_output(output.as_deref(), &join_returned_lines(&rewritten)).await?;

    eprintln!(
        "{}",
        format!("✓ Post-processing complete ({} lines)", rewritten.len())
            .green()
            .bold()
    );
    Ok(())
}

fn describe(json: bool) -> Result<()> {
    let descriptor = PluginDescriptor::estimator();

    if json {
        println!("{}", descriptor.to_json()?);
        return Ok(());
    }

    println!(
        "{} {} (schema v{})",
        descriptor.name.cyan().bold(),
        format!("[{}]", descriptor.key).dimmed(),
        descriptor.version
    );
    println!();

    let rows: Vec<SettingRow> = descriptor
        .setting_definitions()
        .iter()
        .map(|(key, def)| SettingRow {
            key: key.clone(),
            label: def.label.clone(),
            description: def.description.clone(),
            default: format!("{:?}", def.default_value),
        })
        .collect();

    println!("{}", Table::new(rows));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose)?;

    match cli.command {
        Commands::Run {
            input,
            output,
            settings,
            path,
            config_kind,
            config_arg,
        } => {
            let overrides = SettingsOverrides {
                path,
                config_kind,
                config_arg,
            };
            run(
                input.as_deref().map(expand_path),
                output.as_deref().map(expand_path),
                settings.as_deref().map(expand_path),
                overrides,
            )
            .await
        }

        Commands::Describe { json } => describe(json),
    }
}
