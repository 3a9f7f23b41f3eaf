use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::Zero;
use tonlib_core::cell::{ArcCell, Cell, CellParser};

mod admin;
mod burn;
mod deploy;
mod error;
mod internal_transfer;
mod mint;
mod transfer;

pub use admin::*;
pub use burn::*;
pub use deploy::*;
pub use error::*;
pub use internal_transfer::*;
pub use mint::*;
pub use transfer::*;

// Jetton standard, TEP-74
// crc32('transfer query_id:uint64 amount:VarUInteger 16 destination:MsgAddress response_destination:MsgAddress custom_payload:Maybe ^Cell forward_ton_amount:VarUInteger 16 forward_payload:Either Cell ^Cell = InternalMsgBody') = 0x8f8a7ea5 & 0x7fffffff = 0xf8a7ea5
// crc32('internal_transfer query_id:uint64 amount:VarUInteger 16 from:MsgAddress response_address:MsgAddress forward_ton_amount:VarUInteger 16 forward_payload:Either Cell ^Cell = InternalMsgBody') = 0x978d4519 & 0x7fffffff = 0x178d4519
// crc32('burn query_id:uint64 amount:VarUInteger 16 response_destination:MsgAddress custom_payload:Maybe ^Cell = InternalMsgBody') = 0x595f07bc & 0x7fffffff = 0x595f07bc
pub const JETTON_TRANSFER: u32 = 0x0f8a7ea5;
pub const JETTON_INTERNAL_TRANSFER: u32 = 0x178d4519;
pub const JETTON_BURN: u32 = 0x595f07bc;

// Classic minter
pub const JETTON_MINT: u32 = 21;
pub const JETTON_CHANGE_ADMIN: u32 = 3;
pub const JETTON_CHANGE_CONTENT: u32 = 4;

// Jetton 2.0 minter
pub const JETTON_V2_MINT: u32 = 0x642b7d07;
pub const JETTON_V2_CHANGE_ADMIN: u32 = 0x6501f354;
pub const JETTON_V2_CLAIM_ADMIN: u32 = 0xfb88e119;
pub const JETTON_V2_DROP_ADMIN: u32 = 0x7431f221;
pub const JETTON_V2_CHANGE_METADATA_URL: u32 = 0xcb862902;

lazy_static! {
    pub(crate) static ref ZERO_COINS: BigUint = BigUint::zero();
}

pub trait TonMessage: Sized {
    fn build(&self) -> Result<Cell, JettonMessageError>;

    fn parse(cell: &Cell) -> Result<Self, JettonMessageError>;
}

pub trait HasOpcode: TonMessage {
    fn verify_opcode(&self, opcode: u32) -> Result<(), JettonMessageError> {
        let expected_opcode = self.opcode();
        if opcode != expected_opcode {
            Err(JettonMessageError::invalid_body(
                opcode,
                self.query_id(),
                format!("Unexpected opcode, {:#010x} expected", expected_opcode),
            ))
        } else {
            Ok(())
        }
    }

    /// Some minter messages change their opcode with the contract flavor.
    fn opcode(&self) -> u32;

    fn with_query_id(&mut self, query_id: u64) -> &mut Self {
        self.set_query_id(query_id);
        self
    }
    fn set_query_id(&mut self, query_id: u64);

    fn query_id(&self) -> u64;
}

impl TonMessage for Cell {
    fn build(&self) -> Result<Cell, JettonMessageError> {
        Ok(self.clone())
    }

    fn parse(cell: &Cell) -> Result<Self, JettonMessageError> {
        Ok(cell.clone())
    }
}

/// Reads message references in order, so `Maybe ^Cell` fields can be resolved
/// while the data bits are parsed.
pub(crate) struct RefReader<'a> {
    cell: &'a Cell,
    next: usize,
}

impl<'a> RefReader<'a> {
    pub(crate) fn new(cell: &'a Cell) -> Self {
        RefReader { cell, next: 0 }
    }

    pub(crate) fn next_ref(&mut self) -> Result<ArcCell, JettonMessageError> {
        let reference = self.cell.reference(self.next)?.clone();
        self.next += 1;
        Ok(reference)
    }

    pub(crate) fn next_maybe_ref(
        &mut self,
        parser: &mut CellParser,
    ) -> Result<Option<ArcCell>, JettonMessageError> {
        if parser.load_bit()? {
            Ok(Some(self.next_ref()?))
        } else {
            Ok(None)
        }
    }

    /// All references must have been consumed.
    pub(crate) fn ensure_empty(&self) -> Result<(), JettonMessageError> {
        let total = self.cell.references().len();
        if total != self.next {
            return Err(JettonMessageError::invalid(format!(
                "{} unexpected references",
                total - self.next
            )));
        }
        Ok(())
    }
}

/// Reads the `op:uint32 query_id:uint64` header shared by every jetton message.
pub(crate) fn load_header(parser: &mut CellParser) -> Result<(u32, u64), JettonMessageError> {
    let opcode = parser.load_u32(32)?;
    let query_id = parser.load_u64(64)?;
    Ok((opcode, query_id))
}

pub(crate) fn unknown_opcode(opcode: u32, query_id: u64, what: &str) -> JettonMessageError {
    JettonMessageError::invalid_body(opcode, query_id, format!("Unknown {} opcode", what))
}
