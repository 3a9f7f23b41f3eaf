use num_bigint::BigUint;
use tonlib_core::cell::{ArcCell, Cell, CellBuilder};
use tonlib_core::TonAddress;

use super::{load_header, HasOpcode, JettonMessageError, RefReader, TonMessage, ZERO_COINS};
use crate::message::JETTON_INTERNAL_TRANSFER;

/// Creates a body for jetton internal transfer according to TL-B schema:
///
/// ```raw
/// internal_transfer#178d4519 query_id:uint64 amount:(VarUInteger 16) from:MsgAddress
///                            response_address:MsgAddress
///                            forward_ton_amount:(VarUInteger 16)
///                            forward_payload:(Either Cell ^Cell)
///                            = InternalMsgBody;
/// ```
///
/// A minter sends it to the recipient's wallet, with `from` left empty.
#[derive(Clone, Debug, PartialEq)]
pub struct JettonInternalTransferMessage {
    /// arbitrary request number.
    pub query_id: u64,
    /// amount of jettons in elementary units.
    pub amount: BigUint,
    /// previous owner, `addr_none` for freshly minted jettons.
    pub from: TonAddress,
    /// receives the excess Toncoins.
    pub response_address: TonAddress,
    /// nanotons forwarded to the owner with the transfer notification.
    pub forward_ton_amount: BigUint,
    /// stored by reference when present, otherwise as an empty inline payload.
    pub forward_payload: Option<ArcCell>,
}

impl JettonInternalTransferMessage {
    pub fn new(amount: &BigUint) -> Self {
        JettonInternalTransferMessage {
            query_id: 0,
            amount: amount.clone(),
            from: TonAddress::null(),
            response_address: TonAddress::null(),
            forward_ton_amount: ZERO_COINS.clone(),
            forward_payload: None,
        }
    }

    /// The transfer a minter relays when minting `amount` to `recipient`.
    pub fn for_mint(recipient: &TonAddress, amount: &BigUint) -> Self {
        let mut message = Self::new(amount);
        message.with_response_address(recipient);
        message
    }

    pub fn with_from(&mut self, from: &TonAddress) -> &mut Self {
        self.from = from.clone();
        self
    }

    pub fn with_response_address(&mut self, response_address: &TonAddress) -> &mut Self {
        self.response_address = response_address.clone();
        self
    }

    pub fn with_forward_ton_amount(&mut self, forward_ton_amount: &BigUint) -> &mut Self {
        self.forward_ton_amount.clone_from(forward_ton_amount);
        self
    }

    pub fn with_forward_payload(&mut self, forward_payload: ArcCell) -> &mut Self {
        self.forward_payload = Some(forward_payload);
        self
    }
}

impl TonMessage for JettonInternalTransferMessage {
    fn build(&self) -> Result<Cell, JettonMessageError> {
        let mut message = CellBuilder::new();
        message.store_u32(32, JETTON_INTERNAL_TRANSFER)?;
        message.store_u64(64, self.query_id)?;
        message.store_coins(&self.amount)?;
        message.store_address(&self.from)?;
        message.store_address(&self.response_address)?;
        message.store_coins(&self.forward_ton_amount)?;
        message.store_maybe_cell_ref(&self.forward_payload)?;
        Ok(message.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, JettonMessageError> {
        let mut parser = cell.parser();
        let mut refs = RefReader::new(cell);

        let (opcode, query_id) = load_header(&mut parser)?;
        let amount = parser.load_coins()?;
        let from = parser.load_address()?;
        let response_address = parser.load_address()?;
        let forward_ton_amount = parser.load_coins()?;
        let forward_payload = refs.next_maybe_ref(&mut parser)?;
        parser.ensure_empty()?;
        refs.ensure_empty()?;

        let result = JettonInternalTransferMessage {
            query_id,
            amount,
            from,
            response_address,
            forward_ton_amount,
            forward_payload,
        };
        result.verify_opcode(opcode)?;

        Ok(result)
    }
}

impl HasOpcode for JettonInternalTransferMessage {
    fn opcode(&self) -> u32 {
        JETTON_INTERNAL_TRANSFER
    }

    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigUint;
    use tonlib_core::cell::CellBuilder;
    use tonlib_core::TonAddress;

    use crate::message::{
        HasOpcode, JettonInternalTransferMessage, JettonMessageError, TonMessage,
        JETTON_INTERNAL_TRANSFER,
    };

    const RECIPIENT: &str = "EQB3ncyBUTjZUA5EnFKR5_EnOMI9V1tTEAAPaiU71gc4TiUt";

    #[test]
    fn test_mint_transfer_layout() -> Result<(), JettonMessageError> {
        let recipient = TonAddress::from_str(RECIPIENT).unwrap();
        let amount = BigUint::from(1_000_000_000_000_000u64);
        let cell = JettonInternalTransferMessage::for_mint(&recipient, &amount).build()?;

        let mut parser = cell.parser();
        assert_eq!(parser.load_u32(32)?, JETTON_INTERNAL_TRANSFER);
        assert_eq!(parser.load_u64(64)?, 0);
        assert_eq!(parser.load_coins()?, amount);
        assert_eq!(parser.load_address()?, TonAddress::null());
        assert_eq!(parser.load_address()?, recipient);
        assert_eq!(parser.load_coins()?, BigUint::from(0u8));
        assert!(!parser.load_bit()?);
        parser.ensure_empty()?;
        assert!(cell.references().is_empty());
        Ok(())
    }

    #[test]
    fn test_internal_transfer_parse() -> Result<(), JettonMessageError> {
        let payload = CellBuilder::new().store_u32(32, 0)?.build()?.to_arc();
        let mut expected = JettonInternalTransferMessage::new(&BigUint::from(42u8));
        expected
            .with_query_id(7)
            .with_from(&TonAddress::from_str(RECIPIENT).unwrap())
            .with_forward_ton_amount(&BigUint::from(10_000_000u32))
            .with_forward_payload(payload);

        let parsed = JettonInternalTransferMessage::parse(&expected.build()?)?;
        assert_eq!(parsed, expected);
        Ok(())
    }

    #[test]
    fn test_internal_transfer_rejects_other_opcode() -> Result<(), JettonMessageError> {
        let mut builder = CellBuilder::new();
        builder.store_u32(32, 0x0f8a7ea5)?;
        builder.store_u64(64, 3)?;
        builder.store_coins(&BigUint::from(1u8))?;
        builder.store_address(&TonAddress::null())?;
        builder.store_address(&TonAddress::null())?;
        builder.store_coins(&BigUint::from(0u8))?;
        builder.store_bit(false)?;
        let cell = builder.build()?;

        match JettonInternalTransferMessage::parse(&cell) {
            Err(JettonMessageError::InvalidMessage(invalid)) => {
                assert_eq!(invalid.opcode, Some(0x0f8a7ea5));
                assert_eq!(invalid.query_id, Some(3));
            }
            other => panic!("unexpected result {:?}", other),
        }
        Ok(())
    }
}
