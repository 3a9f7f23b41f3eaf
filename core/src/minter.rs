//! Persistent data of jetton minters.
//!
//! ```raw
//! minter_data$_ total_supply:Coins admin_address:MsgAddress
//!               content:^Cell jetton_wallet_code:^Cell = MinterData;
//! minter_data_v2$_ total_supply:Coins admin_address:MsgAddress
//!                  next_admin_address:MsgAddress jetton_wallet_code:^Cell
//!                  metadata_uri:^Cell = MinterData;
//! ```
use num_bigint::BigUint;
use tonlib_core::cell::{ArcCell, Cell, CellBuilder};
use tonlib_core::TonAddress;

pub use error::*;
pub use wallet::*;

use crate::content::{build_metadata_uri_cell, parse_metadata_uri_cell, validate_metadata_uri};
use crate::state_init::StateInit;
use crate::util::ensure_reference_count;

mod error;
mod wallet;

#[derive(Clone, Debug, PartialEq)]
pub struct JettonMinterData {
    pub total_supply: BigUint,
    pub admin: TonAddress,
    /// TEP-64 content cell.
    pub content: ArcCell,
    pub wallet_code: ArcCell,
}

impl JettonMinterData {
    pub fn new(admin: &TonAddress, content: ArcCell, wallet_code: ArcCell) -> Self {
        JettonMinterData {
            total_supply: BigUint::default(),
            admin: admin.clone(),
            content,
            wallet_code,
        }
    }

    pub fn with_total_supply(&mut self, total_supply: &BigUint) -> &mut Self {
        self.total_supply.clone_from(total_supply);
        self
    }

    pub fn build(&self) -> Result<Cell, MinterError> {
        let mut builder = CellBuilder::new();
        builder.store_coins(&self.total_supply)?;
        builder.store_address(&self.admin)?;
        builder.store_reference(&self.content)?;
        builder.store_reference(&self.wallet_code)?;
        Ok(builder.build()?)
    }

    pub fn parse(cell: &Cell) -> Result<Self, MinterError> {
        let mut parser = cell.parser();
        let total_supply = parser.load_coins()?;
        let admin = parser.load_address()?;
        parser.ensure_empty()?;
        ensure_reference_count(cell, 2)?;

        Ok(JettonMinterData {
            total_supply,
            admin,
            content: cell.reference(0)?.clone(),
            wallet_code: cell.reference(1)?.clone(),
        })
    }

    pub fn state_init(&self, minter_code: &ArcCell) -> Result<StateInit, MinterError> {
        Ok(StateInit::new(minter_code.clone(), self.build()?.to_arc()))
    }
}

/// Data of a Jetton 2.0 minter. The admin is handed over in two steps,
/// `next_admin` stays `addr_none` until a change is requested.
#[derive(Clone, Debug, PartialEq)]
pub struct JettonMinterDataV2 {
    pub total_supply: BigUint,
    pub admin: TonAddress,
    pub next_admin: TonAddress,
    pub wallet_code: ArcCell,
    pub metadata_uri: String,
}

impl JettonMinterDataV2 {
    pub fn new(admin: &TonAddress, wallet_code: ArcCell, metadata_uri: &str) -> Self {
        JettonMinterDataV2 {
            total_supply: BigUint::default(),
            admin: admin.clone(),
            next_admin: TonAddress::null(),
            wallet_code,
            metadata_uri: metadata_uri.to_string(),
        }
    }

    pub fn with_total_supply(&mut self, total_supply: &BigUint) -> &mut Self {
        self.total_supply.clone_from(total_supply);
        self
    }

    pub fn with_next_admin(&mut self, next_admin: &TonAddress) -> &mut Self {
        self.next_admin = next_admin.clone();
        self
    }

    /// Fails on metadata URIs explorers cannot fetch.
    pub fn build(&self) -> Result<Cell, MinterError> {
        validate_metadata_uri(&self.metadata_uri)?;
        let metadata_uri = build_metadata_uri_cell(&self.metadata_uri)?;

        let mut builder = CellBuilder::new();
        builder.store_coins(&self.total_supply)?;
        builder.store_address(&self.admin)?;
        builder.store_address(&self.next_admin)?;
        builder.store_reference(&self.wallet_code)?;
        builder.store_child(metadata_uri)?;
        Ok(builder.build()?)
    }

    pub fn parse(cell: &Cell) -> Result<Self, MinterError> {
        let mut parser = cell.parser();
        let total_supply = parser.load_coins()?;
        let admin = parser.load_address()?;
        let next_admin = parser.load_address()?;
        parser.ensure_empty()?;
        ensure_reference_count(cell, 2)?;

        Ok(JettonMinterDataV2 {
            total_supply,
            admin,
            next_admin,
            wallet_code: cell.reference(0)?.clone(),
            metadata_uri: parse_metadata_uri_cell(cell.reference(1)?)?,
        })
    }

    pub fn state_init(&self, minter_code: &ArcCell) -> Result<StateInit, MinterError> {
        Ok(StateInit::new(minter_code.clone(), self.build()?.to_arc()))
    }
}
