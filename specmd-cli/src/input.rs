//! Reading token streams handed over by the external lexer
//!
//!     Token files are JSON arrays of [Token]. Every field except `kind` may be omitted.

use specmd::Token;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a token stream: {source}")]
    Tokens {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn read_tokens(path: &Path) -> Result<Vec<Token>, InputError> {
    let raw = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tokens(&raw).map_err(|source| InputError::Tokens {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_tokens(raw: &str) -> Result<Vec<Token>, serde_json::Error> {
    serde_json::from_str(raw)
}
