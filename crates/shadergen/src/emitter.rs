//! Turns a filtered shader into a named string constant.
//!
//! Types:
//!
//! - `SymbolStyle` picks how a file name becomes a C identifier. One style is
//!   used for a whole run so consuming code can reference symbols by convention.
//! - `Serialization` selects how the constant body is spelled: one escaped
//!   literal per line, or a single raw block.
//! - `EmittedConstant` is the immutable result handed to the header assembler.
//! - `ConstantEmitter` binds a style and serialization for one run.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::filter::{FilteredLine, FilteredSource};
use crate::{ShaderFile, ShaderStage};

pub const RAW_BLOCK_OPEN: &str = "R\"(";
pub const RAW_BLOCK_CLOSE: &str = ")\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolStyle {
    /// `my-shader.fsh` -> `my_shader_fsh`
    #[default]
    Extension,
    /// `my-shader.fsh` -> `my_shader_fragment`
    Stage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Serialization {
    #[default]
    #[serde(alias = "concat")]
    Literal,
    #[serde(alias = "raw")]
    Verbatim,
}

impl Serialization {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Verbatim => "verbatim",
        }
    }

    /// Rejects bodies that cannot be spelled in this form. Only the raw block
    /// can collide, with its closing delimiter.
    pub fn check(self, symbol: &str, lines: &[FilteredLine]) -> Result<(), GenError> {
        if self == Self::Literal {
            return Ok(());
        }
        match lines
            .iter()
            .position(|line| line.text().contains(RAW_BLOCK_CLOSE))
        {
            Some(index) => Err(GenError::DelimiterCollision {
                symbol: symbol.to_string(),
                line: index + 1,
            }),
            None => Ok(()),
        }
    }

    pub fn render_body(self, lines: &[FilteredLine]) -> String {
        match self {
            Self::Literal => {
                if lines.is_empty() {
                    return "\"\"".to_string();
                }
                lines
                    .iter()
                    .map(|line| format!("\"{}\\n\"", escape_literal(line.text())))
                    .collect::<Vec<_>>()
                    .join("\n\t")
            }
            Self::Verbatim => {
                let mut body = String::from(RAW_BLOCK_OPEN);
                body.push('\n');
                for line in lines {
                    body.push_str(line.text());
                    body.push('\n');
                }
                body.push_str(RAW_BLOCK_CLOSE);
                body
            }
        }
    }
}

fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            // Octal escapes stop after three digits, unlike `\x`.
            other if other.is_control() => {
                let mut buf = [0u8; 4];
                for byte in other.encode_utf8(&mut buf).bytes() {
                    escaped.push_str(&format!("\\{byte:03o}"));
                }
            }
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn derive_symbol(file_name: &str, stage: ShaderStage, style: SymbolStyle) -> String {
    let base = match style {
        SymbolStyle::Extension => file_name.to_string(),
        SymbolStyle::Stage => {
            let stem = file_name
                .strip_suffix(stage.extension())
                .and_then(|rest| rest.strip_suffix('.'))
                .unwrap_or(file_name);
            format!("{stem}_{}", stage.word())
        }
    };

    let mut symbol: String = base
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if symbol.starts_with(|ch: char| ch.is_ascii_digit()) {
        symbol.insert(0, '_');
    }
    symbol
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedConstant {
    pub symbol: String,
    pub stage: ShaderStage,
    pub source_path: PathBuf,
    pub lines: Vec<FilteredLine>,
}

impl EmittedConstant {
    pub fn render(&self, serialization: Serialization) -> String {
        format!(
            "const char {}[] = {};",
            self.symbol,
            serialization.render_body(&self.lines)
        )
    }

    /// The string value the compiler sees, independent of serialization.
    pub fn value(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{}\n", line.text()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantEmitter {
    pub symbols: SymbolStyle,
    pub serialization: Serialization,
}

impl ConstantEmitter {
    pub fn new(symbols: SymbolStyle, serialization: Serialization) -> Self {
        Self {
            symbols,
            serialization,
        }
    }

    pub fn emit(
        &self,
        file: &ShaderFile,
        filtered: FilteredSource,
    ) -> Result<EmittedConstant, GenError> {
        let symbol = derive_symbol(&file.file_name, file.stage, self.symbols);
        self.serialization.check(&symbol, &filtered.lines)?;
        Ok(EmittedConstant {
            symbol,
            stage: file.stage,
            source_path: file.relative_path.clone(),
            lines: filtered.lines,
        })
    }
}
