//! Contract code shipped with the crate and BoC helpers.
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tonlib_core::cell::{ArcCell, BagOfCells, Cell, TonCellError};

/// Official Jetton 2.0 minter, compiled.
pub const JETTON_MINTER_V2_CODE: &str = include_str!("../resources/jetton-2.0/minter.hex");
/// Official Jetton 2.0 wallet, compiled.
pub const JETTON_WALLET_V2_CODE: &str = include_str!("../resources/jetton-2.0/wallet.hex");

pub fn jetton_minter_v2_code() -> Result<ArcCell, TonCellError> {
    cell_from_boc_hex(JETTON_MINTER_V2_CODE)
}

pub fn jetton_wallet_v2_code() -> Result<ArcCell, TonCellError> {
    cell_from_boc_hex(JETTON_WALLET_V2_CODE)
}

pub fn cell_from_boc_hex(boc: &str) -> Result<ArcCell, TonCellError> {
    Ok(BagOfCells::parse_hex(boc.trim())?.single_root()?.clone())
}

pub fn cell_from_boc_b64(boc: &str) -> Result<ArcCell, TonCellError> {
    Ok(BagOfCells::parse_base64(boc.trim())?.single_root()?.clone())
}

/// Single-root BoC with CRC32C, base64 encoded, as wallets expect it.
pub fn cell_to_boc_b64(cell: &Cell) -> Result<String, TonCellError> {
    let boc = BagOfCells::from_root(cell.clone()).serialize(true)?;
    Ok(STANDARD.encode(boc))
}

pub fn cell_to_boc_hex(cell: &Cell) -> Result<String, TonCellError> {
    let boc = BagOfCells::from_root(cell.clone()).serialize(true)?;
    Ok(hex::encode(boc))
}
