use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tonlib_core::cell::{ArcCell, Cell, CellBuilder};
use tonlib_core::TonAddress;

use super::{JettonMessageError, RefReader, TonMessage, ZERO_COINS};
use crate::code::{cell_from_boc_b64, cell_to_boc_b64};
use crate::state_init::StateInit;

/// Internal message deploying a contract, as a wallet places it in its out actions.
///
/// ```raw
/// int_msg_info$0 ihr_disabled:Bool bounce:Bool bounced:Bool
///   src:MsgAddressInt dest:MsgAddressInt value:CurrencyCollection
///   ihr_fee:Grams fwd_fee:Grams created_lt:uint64 created_at:uint32 = CommonMsgInfoRelaxed;
/// message$_ info:CommonMsgInfoRelaxed init:(Maybe (Either StateInit ^StateInit))
///   body:(Either X ^X) = MessageRelaxed X;
/// ```
///
/// The StateInit and a non-empty body always go by reference. Source, fees and
/// timestamps are left for the sending wallet and the validators to fill in.
#[derive(Clone, Debug, PartialEq)]
pub struct DeployMessage {
    /// Bounceable deploys return the value if the contract fails to initialize.
    pub bounce: bool,
    pub destination: TonAddress,
    pub value: BigUint,
    pub state_init: ArcCell,
    pub body: Option<ArcCell>,
}

impl DeployMessage {
    pub fn new(destination: &TonAddress, value: &BigUint, state_init: ArcCell) -> Self {
        DeployMessage {
            bounce: false,
            destination: destination.clone(),
            value: value.clone(),
            state_init,
            body: None,
        }
    }

    /// Deploys `state_init` to the address it derives in `workchain`.
    pub fn for_state_init(
        state_init: &StateInit,
        workchain: i32,
        value: &BigUint,
    ) -> Result<Self, JettonMessageError> {
        let destination = state_init.contract_address(workchain)?;
        Ok(Self::new(&destination, value, state_init.build()?.to_arc()))
    }

    pub fn with_bounce(&mut self, bounce: bool) -> &mut Self {
        self.bounce = bounce;
        self
    }

    pub fn with_body(&mut self, body: ArcCell) -> &mut Self {
        self.body = Some(body);
        self
    }
}

impl TonMessage for DeployMessage {
    fn build(&self) -> Result<Cell, JettonMessageError> {
        let mut builder = CellBuilder::new();
        builder.store_bit(false)?; // int_msg_info
        builder.store_bit(true)?; // ihr_disabled
        builder.store_bit(self.bounce)?;
        builder.store_bit(false)?; // bounced
        builder.store_address(&TonAddress::null())?; // src
        builder.store_address(&self.destination)?;
        builder.store_coins(&self.value)?;
        builder.store_bit(false)?; // extra currencies
        builder.store_coins(&ZERO_COINS)?; // ihr_fee
        builder.store_coins(&ZERO_COINS)?; // fwd_fee
        builder.store_u64(64, 0)?; // created_lt
        builder.store_u32(32, 0)?; // created_at
        builder.store_bit(true)?; // init present
        builder.store_bit(true)?; // init by reference
        builder.store_reference(&self.state_init)?;
        match &self.body {
            Some(body) => {
                builder.store_bit(true)?;
                builder.store_reference(body)?;
            }
            None => {
                builder.store_bit(false)?;
            }
        }
        Ok(builder.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, JettonMessageError> {
        let mut parser = cell.parser();
        let mut refs = RefReader::new(cell);

        if parser.load_bit()? {
            return Err(JettonMessageError::invalid("External messages do not deploy contracts"));
        }
        let _ihr_disabled = parser.load_bit()?;
        let bounce = parser.load_bit()?;
        let _bounced = parser.load_bit()?;
        let _src = parser.load_address()?;
        let destination = parser.load_address()?;
        let value = parser.load_coins()?;
        if parser.load_bit()? {
            return Err(JettonMessageError::invalid("Extra currencies are not supported"));
        }
        let _ihr_fee = parser.load_coins()?;
        let _fwd_fee = parser.load_coins()?;
        let _created_lt = parser.load_u64(64)?;
        let _created_at = parser.load_u32(32)?;
        if !parser.load_bit()? {
            return Err(JettonMessageError::invalid("Message carries no StateInit"));
        }
        if !parser.load_bit()? {
            return Err(JettonMessageError::invalid("Inline StateInit is not supported"));
        }
        let state_init = refs.next_ref()?;
        let body = if parser.load_bit()? {
            Some(refs.next_ref()?)
        } else {
            None
        };
        parser.ensure_empty()?;
        refs.ensure_empty()?;

        Ok(DeployMessage {
            bounce,
            destination,
            value,
            state_init,
            body,
        })
    }
}

/// Transaction request handed to a TonConnect wallet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    /// user-friendly address of the contract.
    pub address: String,
    /// nanotons, as a decimal string.
    pub amount: String,
    /// base64 BoC of the StateInit.
    pub state_init: String,
    /// base64 BoC of the message body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl DeployRequest {
    pub fn new(
        address: &TonAddress,
        amount: &BigUint,
        state_init: &Cell,
        payload: Option<&Cell>,
    ) -> Result<Self, JettonMessageError> {
        let payload = match payload {
            Some(cell) => Some(cell_to_boc_b64(cell)?),
            None => None,
        };
        Ok(DeployRequest {
            address: address.to_base64_url(),
            amount: amount.to_str_radix(10),
            state_init: cell_to_boc_b64(state_init)?,
            payload,
        })
    }

    pub fn from_message(message: &DeployMessage) -> Result<Self, JettonMessageError> {
        Self::new(
            &message.destination,
            &message.value,
            &message.state_init,
            message.body.as_deref(),
        )
    }

    /// Rebuilds the message the wallet will send for this request.
    pub fn to_message(&self) -> Result<DeployMessage, JettonMessageError> {
        let destination = self.address.parse::<TonAddress>().map_err(|e| {
            JettonMessageError::invalid(format!("Invalid address {}: {}", self.address, e))
        })?;
        let value = BigUint::parse_bytes(self.amount.as_bytes(), 10)
            .ok_or_else(|| JettonMessageError::invalid(format!("Invalid amount {}", self.amount)))?;
        let state_init = cell_from_boc_b64(&self.state_init)?;

        let mut message = DeployMessage::new(&destination, &value, state_init);
        if let Some(payload) = &self.payload {
            message.with_body(cell_from_boc_b64(payload)?);
        }
        Ok(message)
    }
}
