use num_bigint::BigUint;
use tonlib_core::cell::{Cell, CellBuilder};
use tonlib_core::TonAddress;

use super::{
    load_header, unknown_opcode, HasOpcode, JettonInternalTransferMessage, JettonMessageError,
    RefReader, TonMessage,
};
use crate::types::JettonFlavor;
use crate::units::{DEFAULT_FORWARD_TON_AMOUNT, V2_FORWARD_TON_AMOUNT, V2_MINT_TON_AMOUNT};

/// Creates a body for minting jettons according to TL-B schema:
///
/// ```raw
/// mint#00000015 query_id:uint64 to_address:MsgAddress amount:(VarUInteger 16)
///               master_msg:^InternalMsgBody = InternalMsgBody;
/// mint#642b7d07 query_id:uint64 to_address:MsgAddress ton_amount:(VarUInteger 16)
///               master_msg:^InternalMsgBody = InternalMsgBody;
/// ```
///
/// `master_msg` is the [`JettonInternalTransferMessage`] the minter relays to
/// the recipient's wallet, `ton_amount` is attached to it to deploy that wallet.
#[derive(Clone, Debug, PartialEq)]
pub struct JettonMintMessage {
    pub flavor: JettonFlavor,
    /// arbitrary request number, shared with the internal transfer.
    pub query_id: u64,
    /// owner of the jetton wallet receiving the minted jettons.
    pub destination: TonAddress,
    /// nanotons forwarded with the internal transfer.
    pub ton_amount: BigUint,
    pub internal_transfer: JettonInternalTransferMessage,
}

impl JettonMintMessage {
    /// Mint of `amount` elementary units to `destination` with the flavor's default Toncoin amounts.
    pub fn new(flavor: JettonFlavor, destination: &TonAddress, amount: &BigUint) -> Self {
        let mut internal_transfer = JettonInternalTransferMessage::for_mint(destination, amount);
        let ton_amount = match flavor {
            JettonFlavor::Classic => DEFAULT_FORWARD_TON_AMOUNT.clone(),
            JettonFlavor::V2 => {
                internal_transfer.with_forward_ton_amount(&V2_FORWARD_TON_AMOUNT);
                V2_MINT_TON_AMOUNT.clone()
            }
        };
        JettonMintMessage {
            flavor,
            query_id: 0,
            destination: destination.clone(),
            ton_amount,
            internal_transfer,
        }
    }

    pub fn with_ton_amount(&mut self, ton_amount: &BigUint) -> &mut Self {
        self.ton_amount.clone_from(ton_amount);
        self
    }

    pub fn with_internal_transfer(
        &mut self,
        internal_transfer: JettonInternalTransferMessage,
    ) -> &mut Self {
        self.internal_transfer = internal_transfer;
        self
    }

    pub fn amount(&self) -> &BigUint {
        &self.internal_transfer.amount
    }
}

impl TonMessage for JettonMintMessage {
    fn build(&self) -> Result<Cell, JettonMessageError> {
        let master_msg = self.internal_transfer.build()?;

        let mut message = CellBuilder::new();
        message.store_u32(32, self.flavor.mint_opcode())?;
        message.store_u64(64, self.query_id)?;
        message.store_address(&self.destination)?;
        message.store_coins(&self.ton_amount)?;
        message.store_child(master_msg)?;
        let cell = message.build()?;

        log::trace!(
            "Built {} mint of {} to {}",
            self.flavor,
            self.amount(),
            self.destination
        );
        Ok(cell)
    }

    fn parse(cell: &Cell) -> Result<Self, JettonMessageError> {
        let mut parser = cell.parser();
        let mut refs = RefReader::new(cell);

        let (opcode, query_id) = load_header(&mut parser)?;
        let flavor = JettonFlavor::from_mint_opcode(opcode)
            .ok_or_else(|| unknown_opcode(opcode, query_id, "mint"))?;
        let destination = parser.load_address()?;
        let ton_amount = parser.load_coins()?;
        parser.ensure_empty()?;
        let internal_transfer = JettonInternalTransferMessage::parse(refs.next_ref()?.as_ref())?;
        refs.ensure_empty()?;

        Ok(JettonMintMessage {
            flavor,
            query_id,
            destination,
            ton_amount,
            internal_transfer,
        })
    }
}

impl HasOpcode for JettonMintMessage {
    fn opcode(&self) -> u32 {
        self.flavor.mint_opcode()
    }

    /// Updates the relayed internal transfer as well.
    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
        self.internal_transfer.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigUint;
    use tonlib_core::TonAddress;

    use crate::message::{
        HasOpcode, JettonInternalTransferMessage, JettonMessageError, JettonMintMessage,
        TonMessage, JETTON_INTERNAL_TRANSFER, JETTON_MINT, JETTON_V2_MINT,
    };
    use crate::types::JettonFlavor;

    const RECIPIENT: &str = "EQB3ncyBUTjZUA5EnFKR5_EnOMI9V1tTEAAPaiU71gc4TiUt";

    fn recipient() -> TonAddress {
        TonAddress::from_str(RECIPIENT).unwrap()
    }

    #[test]
    fn test_classic_mint_layout() -> Result<(), JettonMessageError> {
        let amount = BigUint::from(1_000_000_000_000_000u64);
        let cell = JettonMintMessage::new(JettonFlavor::Classic, &recipient(), &amount).build()?;

        let mut parser = cell.parser();
        assert_eq!(parser.load_u32(32)?, JETTON_MINT);
        assert_eq!(parser.load_u64(64)?, 0);
        assert_eq!(parser.load_address()?, recipient());
        assert_eq!(parser.load_coins()?, BigUint::from(50_000_000u64));
        parser.ensure_empty()?;
        assert_eq!(cell.references().len(), 1);

        let master_msg = cell.reference(0)?;
        assert_eq!(master_msg.parser().load_u32(32)?, JETTON_INTERNAL_TRANSFER);
        let transfer = JettonInternalTransferMessage::parse(master_msg)?;
        assert_eq!(transfer.amount, amount);
        assert_eq!(transfer.from, TonAddress::null());
        assert_eq!(transfer.response_address, recipient());
        assert_eq!(transfer.forward_ton_amount, BigUint::from(0u8));
        assert_eq!(transfer.forward_payload, None);
        Ok(())
    }

    #[test]
    fn test_v2_mint_defaults() -> Result<(), JettonMessageError> {
        let amount = BigUint::from(5u8);
        let message = JettonMintMessage::new(JettonFlavor::V2, &recipient(), &amount);
        assert_eq!(message.opcode(), JETTON_V2_MINT);
        assert_eq!(message.ton_amount, BigUint::from(100_000_000u64));
        assert_eq!(
            message.internal_transfer.forward_ton_amount,
            BigUint::from(10_000_000u64)
        );

        let parsed = JettonMintMessage::parse(&message.build()?)?;
        assert_eq!(parsed, message);
        Ok(())
    }

    #[test]
    fn test_query_id_reaches_internal_transfer() -> Result<(), JettonMessageError> {
        let mut message =
            JettonMintMessage::new(JettonFlavor::Classic, &recipient(), &BigUint::from(1u8));
        message
            .with_query_id(0xdeadbeef)
            .with_ton_amount(&BigUint::from(70_000_000u64));

        let parsed = JettonMintMessage::parse(&message.build()?)?;
        assert_eq!(parsed.query_id(), 0xdeadbeef);
        assert_eq!(parsed.internal_transfer.query_id, 0xdeadbeef);
        assert_eq!(parsed.ton_amount, BigUint::from(70_000_000u64));
        Ok(())
    }

    #[test]
    fn test_mint_rejects_unknown_opcode() -> Result<(), JettonMessageError> {
        let transfer =
            JettonInternalTransferMessage::for_mint(&recipient(), &BigUint::from(1u8)).build()?;
        assert!(matches!(
            JettonMintMessage::parse(&transfer),
            Err(JettonMessageError::InvalidMessage(_))
        ));
        Ok(())
    }
}
