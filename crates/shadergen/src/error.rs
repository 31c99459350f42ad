use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("failed to traverse shader directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read shader {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shader {path} is not valid UTF-8 text")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("shader constant '{symbol}' contains the raw block delimiter on line {line}")]
    DelimiterCollision { symbol: String, line: usize },

    #[error("shaders {first} and {second} both map to constant '{symbol}'")]
    DuplicateSymbol {
        symbol: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("failed to write generated header to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
