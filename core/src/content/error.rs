use std::string::FromUtf8Error;

use thiserror::Error;
use tonlib_core::cell::TonCellError;

use super::metadata::{format_field_errors, FieldError};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("TonCellError ({0})")]
    TonCellError(#[from] TonCellError),

    #[error("Unsupported content layout (tag: {0:#04x})")]
    UnsupportedLayout(u8),

    #[error("Invalid metadata uri ({0}): must start with http://, https:// or ipfs://")]
    InvalidMetaDataUri(String),

    #[error("Invalid jetton metadata ({})", format_field_errors(.0))]
    InvalidMetaData(Vec<FieldError>),

    #[error("Content has no {0} field")]
    MissingField(&'static str),

    #[error("Invalid decimals in content ({0})")]
    InvalidDecimals(String),

    #[error("Content is not valid UTF-8 ({0})")]
    Utf8Error(#[from] FromUtf8Error),

    #[error("Serde_json Error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}
