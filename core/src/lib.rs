pub mod code;
pub mod content;
pub mod message;
pub mod minter;
pub mod state_init;
pub mod types;
pub mod units;
mod util;

pub use tonlib_core::cell::{ArcCell, Cell};
pub use tonlib_core::TonAddress;

pub use crate::state_init::StateInit;
pub use crate::types::JettonFlavor;
