use num_bigint::BigUint;
use tonlib_core::cell::{ArcCell, Cell, CellBuilder};
use tonlib_core::TonAddress;

use super::{load_header, HasOpcode, JettonMessageError, RefReader, TonMessage, ZERO_COINS};
use crate::message::JETTON_TRANSFER;

/// Creates a body for jetton transfer according to TL-B schema:
///
/// ```raw
/// transfer#0f8a7ea5 query_id:uint64 amount:(VarUInteger 16) destination:MsgAddress
///                  response_destination:MsgAddress custom_payload:(Maybe ^Cell)
///                  forward_ton_amount:(VarUInteger 16) forward_payload:(Either Cell ^Cell)
///                  = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct JettonTransferMessage {
    /// arbitrary request number.
    pub query_id: u64,
    /// amount of transferred jettons in elementary units.
    pub amount: BigUint,
    /// address of the new owner of the jettons.
    pub destination: TonAddress,
    /// address where to send a response with confirmation of a successful transfer and the rest of the incoming message Toncoins.
    pub response_destination: TonAddress,
    /// optional custom data (which is used by either sender or receiver jetton wallet for inner logic).
    pub custom_payload: Option<ArcCell>,
    ///  the amount of nanotons to be sent to the destination address.
    pub forward_ton_amount: BigUint,
    ///  optional custom data that should be sent to the destination address.
    pub forward_payload: Option<ArcCell>,
}

impl JettonTransferMessage {
    pub fn new(destination: &TonAddress, amount: &BigUint) -> Self {
        JettonTransferMessage {
            query_id: 0,
            amount: amount.clone(),
            destination: destination.clone(),
            response_destination: TonAddress::null(),
            custom_payload: None,
            forward_ton_amount: ZERO_COINS.clone(),
            forward_payload: None,
        }
    }

    pub fn with_response_destination(&mut self, response_destination: &TonAddress) -> &mut Self {
        self.response_destination = response_destination.clone();
        self
    }

    pub fn with_custom_payload(&mut self, custom_payload: ArcCell) -> &mut Self {
        self.custom_payload = Some(custom_payload);
        self
    }

    pub fn with_forward_payload(
        &mut self,
        forward_ton_amount: &BigUint,
        forward_payload: ArcCell,
    ) -> &mut Self {
        self.forward_ton_amount.clone_from(forward_ton_amount);
        self.forward_payload = Some(forward_payload);
        self
    }
}

impl TonMessage for JettonTransferMessage {
    fn build(&self) -> Result<Cell, JettonMessageError> {
        let mut message = CellBuilder::new();
        message.store_u32(32, JETTON_TRANSFER)?;
        message.store_u64(64, self.query_id)?;
        message.store_coins(&self.amount)?;
        message.store_address(&self.destination)?;
        message.store_address(&self.response_destination)?;
        message.store_maybe_cell_ref(&self.custom_payload)?;
        message.store_coins(&self.forward_ton_amount)?;
        message.store_maybe_cell_ref(&self.forward_payload)?;
        Ok(message.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, JettonMessageError> {
        let mut parser = cell.parser();
        let mut refs = RefReader::new(cell);

        let (opcode, query_id) = load_header(&mut parser)?;
        let amount = parser.load_coins()?;
        let destination = parser.load_address()?;
        let response_destination = parser.load_address()?;
        let custom_payload = refs.next_maybe_ref(&mut parser)?;
        let forward_ton_amount = parser.load_coins()?;
        let forward_payload = refs.next_maybe_ref(&mut parser)?;
        parser.ensure_empty()?;
        refs.ensure_empty()?;

        let result = JettonTransferMessage {
            query_id,
            amount,
            destination,
            response_destination,
            custom_payload,
            forward_ton_amount,
            forward_payload,
        };
        result.verify_opcode(opcode)?;

        Ok(result)
    }
}

impl HasOpcode for JettonTransferMessage {
    fn opcode(&self) -> u32 {
        JETTON_TRANSFER
    }

    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }
}
