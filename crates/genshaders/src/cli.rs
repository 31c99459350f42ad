use std::path::PathBuf;

use clap::Parser;
use shadergen::{Serialization, SymbolStyle};

#[derive(Parser, Debug)]
#[command(
    name = "genshaders",
    author,
    version,
    about = "Embeds GLSL shader sources into a generated header",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Tool name written into the generated banner (defaults to `genshaders`).
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Generator settings in TOML; missing keys fall back to defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Shader root to scan for `.fsh`/`.vsh` files.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Header path to write instead of `<root>/Shaders.h`.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Constant serialization: `literal` (default) or `verbatim`.
    #[arg(long, value_name = "MODE", value_parser = parse_serialization)]
    pub mode: Option<Serialization>,

    /// Symbol naming: `extension` (`fade_fsh`) or `stage` (`fade_fragment`).
    #[arg(long, value_name = "STYLE", value_parser = parse_symbol_style)]
    pub symbols: Option<SymbolStyle>,

    /// Print the header to stdout instead of writing it.
    #[arg(long)]
    pub stdout: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_serialization(value: &str) -> Result<Serialization, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("serialization mode must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "literal" | "concat" | "concatenation" => Ok(Serialization::Literal),
        "verbatim" | "raw" | "block" => Ok(Serialization::Verbatim),
        other => Err(format!(
            "unknown serialization mode '{other}'; expected literal or verbatim"
        )),
    }
}

pub fn parse_symbol_style(value: &str) -> Result<SymbolStyle, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("symbol style must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "extension" | "ext" => Ok(SymbolStyle::Extension),
        "stage" => Ok(SymbolStyle::Stage),
        other => Err(format!(
            "unknown symbol style '{other}'; expected extension or stage"
        )),
    }
}
