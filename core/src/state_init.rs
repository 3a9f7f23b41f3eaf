//! Contract StateInit and address derivation.
//!
//! ```raw
//! _ split_depth:(Maybe (## 5)) special:(Maybe TickTock)
//!   code:(Maybe ^Cell) data:(Maybe ^Cell)
//!   library:(Maybe ^Cell) = StateInit;
//! ```
use tonlib_core::cell::{ArcCell, Cell, CellBuilder, TonCellError};
use tonlib_core::TonAddress;

use crate::util::ensure_reference_count;

pub const BASECHAIN: i32 = 0;
pub const MASTERCHAIN: i32 = -1;

/// StateInit of an ordinary contract: no split depth, no tick-tock, no libraries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateInit {
    pub code: Option<ArcCell>,
    pub data: Option<ArcCell>,
}

impl StateInit {
    pub fn new(code: ArcCell, data: ArcCell) -> Self {
        StateInit {
            code: Some(code),
            data: Some(data),
        }
    }

    pub fn build(&self) -> Result<Cell, TonCellError> {
        let mut builder = CellBuilder::new();
        builder.store_bit(false)?; // split_depth
        builder.store_bit(false)?; // special
        builder.store_maybe_cell_ref(&self.code)?;
        builder.store_maybe_cell_ref(&self.data)?;
        builder.store_bit(false)?; // library
        builder.build()
    }

    pub fn parse(cell: &Cell) -> Result<StateInit, TonCellError> {
        let mut parser = cell.parser();
        if parser.load_bit()? {
            return Err(TonCellError::cell_parser_error(
                "StateInit with split_depth is not supported",
            ));
        }
        if parser.load_bit()? {
            return Err(TonCellError::cell_parser_error(
                "StateInit of a tick-tock contract is not supported",
            ));
        }
        let has_code = parser.load_bit()?;
        let has_data = parser.load_bit()?;
        if parser.load_bit()? {
            return Err(TonCellError::cell_parser_error(
                "StateInit with libraries is not supported",
            ));
        }
        parser.ensure_empty()?;
        ensure_reference_count(cell, has_code as usize + has_data as usize)?;

        let mut refs = cell.references().iter();
        let code = if has_code { refs.next().cloned() } else { None };
        let data = if has_data { refs.next().cloned() } else { None };
        Ok(StateInit { code, data })
    }

    /// Address of the contract deployed with this StateInit.
    pub fn contract_address(&self, workchain: i32) -> Result<TonAddress, TonCellError> {
        Ok(contract_address(&self.build()?, workchain))
    }
}

/// `workchain:representation_hash(state_init)`.
pub fn contract_address(state_init: &Cell, workchain: i32) -> TonAddress {
    let address = TonAddress {
        workchain,
        hash_part: state_init.cell_hash(),
    };
    log::debug!("Derived contract address {}", address.to_hex());
    address
}
