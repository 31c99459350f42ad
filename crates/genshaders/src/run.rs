use anyhow::{Context, Result};
use chrono::Datelike;
use shadergen::{generate, Banner, GeneratorConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

const DEFAULT_TOOL_NAME: &str = "genshaders";

pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let output = cli.output.clone().unwrap_or_else(|| config.output_path());
    tracing::debug!(
        root = %config.shader_root.display(),
        output = %output.display(),
        mode = config.serialization.as_str(),
        symbols = ?config.symbols,
        "resolved generator configuration"
    );

    let banner = Banner {
        tool_name: cli
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_TOOL_NAME.to_string()),
        year: chrono::Local::now().year(),
        organisation: config.organisation.clone(),
        license: config.license.clone(),
    };

    let generation = generate(&config, banner).with_context(|| {
        format!(
            "failed to generate shader header from {}",
            config.shader_root.display()
        )
    })?;

    for summary in &generation.summaries {
        tracing::info!(
            symbol = %summary.symbol,
            stage = summary.stage.word(),
            path = %summary.path.display(),
            lines = summary.code_lines,
            "embedded shader"
        );
    }

    if cli.stdout {
        print!("{}", generation.header.text());
        return Ok(());
    }

    generation
        .header
        .write(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "Embedded {} shader(s) into {}",
        generation.summaries.len(),
        output.display()
    );
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match cli.config.as_ref() {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load generator config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(root) = cli.root.as_ref() {
        config.shader_root = root.clone();
    }
    if let Some(mode) = cli.mode {
        config.serialization = mode;
    }
    if let Some(symbols) = cli.symbols {
        config.symbols = symbols;
    }
    config
        .validate()
        .context("invalid generator configuration")?;
    Ok(config)
}

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
