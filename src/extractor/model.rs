use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fetcher::FailureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Density scoring over the whole document.
    Readability,
    /// First matching content container after boilerplate removal.
    Selector,
}

#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub title: Option<String>,
    pub content: String,
    pub method: ExtractionMethod,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("markup could not be parsed: {0}")]
    Parse(String),

    #[error("no readable content found")]
    Empty,
}

impl ExtractError {
    pub fn kind(&self) -> FailureKind {
        FailureKind::Parse
    }
}
