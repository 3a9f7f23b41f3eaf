use num_bigint::BigUint;
use tonlib_core::cell::{ArcCell, Cell, CellBuilder};
use tonlib_core::TonAddress;

use super::{load_header, HasOpcode, JettonMessageError, RefReader, TonMessage};
use crate::message::JETTON_BURN;

/// Creates a body for jetton burn according to TL-B schema:
///
/// ```raw
/// burn#595f07bc query_id:uint64 amount:(VarUInteger 16)
///               response_destination:MsgAddress custom_payload:(Maybe ^Cell)
///               = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct JettonBurnMessage {
    /// arbitrary request number.
    pub query_id: u64,
    /// amount of burned jettons
    pub amount: BigUint,
    /// address where to send a response with confirmation of a successful burn and the rest of the incoming message coins.
    pub response_destination: TonAddress,
    /// optional custom data (which is used by either sender or receiver jetton wallet for inner logic).
    pub custom_payload: Option<ArcCell>,
}

impl JettonBurnMessage {
    pub fn new(amount: &BigUint) -> Self {
        JettonBurnMessage {
            query_id: 0,
            amount: amount.clone(),
            response_destination: TonAddress::null(),
            custom_payload: None,
        }
    }

    pub fn with_response_destination(&mut self, response_destination: &TonAddress) -> &mut Self {
        self.response_destination = response_destination.clone();
        self
    }

    pub fn with_custom_payload(&mut self, custom_payload: &ArcCell) -> &mut Self {
        self.custom_payload = Some(custom_payload.clone());
        self
    }
}

impl TonMessage for JettonBurnMessage {
    fn build(&self) -> Result<Cell, JettonMessageError> {
        let mut message = CellBuilder::new();
        message.store_u32(32, JETTON_BURN)?;
        message.store_u64(64, self.query_id)?;
        message.store_coins(&self.amount)?;
        message.store_address(&self.response_destination)?;
        message.store_maybe_cell_ref(&self.custom_payload)?;
        Ok(message.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, JettonMessageError> {
        let mut parser = cell.parser();
        let mut refs = RefReader::new(cell);

        let (opcode, query_id) = load_header(&mut parser)?;
        let amount = parser.load_coins()?;
        let response_destination = parser.load_address()?;
        let custom_payload = refs.next_maybe_ref(&mut parser)?;
        parser.ensure_empty()?;
        refs.ensure_empty()?;

        let result = JettonBurnMessage {
            query_id,
            amount,
            response_destination,
            custom_payload,
        };
        result.verify_opcode(opcode)?;
        Ok(result)
    }
}

impl HasOpcode for JettonBurnMessage {
    fn opcode(&self) -> u32 {
        JETTON_BURN
    }

    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }
}
