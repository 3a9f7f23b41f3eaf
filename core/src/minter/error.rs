use thiserror::Error;
use tonlib_core::cell::TonCellError;

use crate::content::ContentError;

#[derive(Error, Debug)]
pub enum MinterError {
    #[error("TonCellError ({0})")]
    TonCellError(#[from] TonCellError),

    #[error("ContentError ({0})")]
    ContentError(#[from] ContentError),
}
