use tonlib_core::cell::{ArcCell, Cell, CellBuilder};
use tonlib_core::TonAddress;

use super::{
    load_header, unknown_opcode, HasOpcode, JettonMessageError, RefReader, TonMessage,
    JETTON_V2_CLAIM_ADMIN, JETTON_V2_DROP_ADMIN,
};
use crate::content::{load_snake_bytes, snake_string_cell, validate_metadata_uri};
use crate::types::JettonFlavor;

/// Creates a body for changing the minter admin according to TL-B schema:
///
/// ```raw
/// change_admin#00000003 query_id:uint64 new_admin:MsgAddress = InternalMsgBody;
/// change_admin#6501f354 query_id:uint64 new_admin:MsgAddress = InternalMsgBody;
/// ```
///
/// A Jetton 2.0 minter only records the new admin, who then has to send
/// [`JettonClaimAdminMessage`].
#[derive(Clone, Debug, PartialEq)]
pub struct JettonChangeAdminMessage {
    pub flavor: JettonFlavor,
    pub query_id: u64,
    pub new_admin: TonAddress,
}

impl JettonChangeAdminMessage {
    pub fn new(flavor: JettonFlavor, new_admin: &TonAddress) -> Self {
        JettonChangeAdminMessage {
            flavor,
            query_id: 0,
            new_admin: new_admin.clone(),
        }
    }
}

impl TonMessage for JettonChangeAdminMessage {
    fn build(&self) -> Result<Cell, JettonMessageError> {
        let mut message = CellBuilder::new();
        message.store_u32(32, self.flavor.change_admin_opcode())?;
        message.store_u64(64, self.query_id)?;
        message.store_address(&self.new_admin)?;
        Ok(message.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, JettonMessageError> {
        let mut parser = cell.parser();
        let (opcode, query_id) = load_header(&mut parser)?;
        let flavor = JettonFlavor::from_change_admin_opcode(opcode)
            .ok_or_else(|| unknown_opcode(opcode, query_id, "change_admin"))?;
        let new_admin = parser.load_address()?;
        parser.ensure_empty()?;
        RefReader::new(cell).ensure_empty()?;

        Ok(JettonChangeAdminMessage {
            flavor,
            query_id,
            new_admin,
        })
    }
}

impl HasOpcode for JettonChangeAdminMessage {
    fn opcode(&self) -> u32 {
        self.flavor.change_admin_opcode()
    }

    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }
}

/// `claim_admin#fb88e119 query_id:uint64 = InternalMsgBody;`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JettonClaimAdminMessage {
    pub query_id: u64,
}

/// `drop_admin#7431f221 query_id:uint64 = InternalMsgBody;`
///
/// Leaves a Jetton 2.0 minter without an admin for good.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JettonDropAdminMessage {
    pub query_id: u64,
}

macro_rules! query_only_message {
    ($message:ident, $opcode:ident) => {
        impl $message {
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl TonMessage for $message {
            fn build(&self) -> Result<Cell, JettonMessageError> {
                let mut message = CellBuilder::new();
                message.store_u32(32, $opcode)?;
                message.store_u64(64, self.query_id)?;
                Ok(message.build()?)
            }

            fn parse(cell: &Cell) -> Result<Self, JettonMessageError> {
                let mut parser = cell.parser();
                let (opcode, query_id) = load_header(&mut parser)?;
                parser.ensure_empty()?;
                RefReader::new(cell).ensure_empty()?;

                let result = $message { query_id };
                result.verify_opcode(opcode)?;
                Ok(result)
            }
        }

        impl HasOpcode for $message {
            fn opcode(&self) -> u32 {
                $opcode
            }

            fn set_query_id(&mut self, query_id: u64) {
                self.query_id = query_id;
            }

            fn query_id(&self) -> u64 {
                self.query_id
            }
        }
    };
}

query_only_message!(JettonClaimAdminMessage, JETTON_V2_CLAIM_ADMIN);
query_only_message!(JettonDropAdminMessage, JETTON_V2_DROP_ADMIN);

/// Creates a body for replacing the token content according to TL-B schema:
///
/// ```raw
/// change_content#00000004 query_id:uint64 new_content:^Cell = InternalMsgBody;
/// change_metadata_url#cb862902 query_id:uint64 new_metadata_url:^SnakeString = InternalMsgBody;
/// ```
///
/// For `Classic` the reference holds a full TEP-64 content cell, for `V2` the
/// bare URI as a snake string.
#[derive(Clone, Debug, PartialEq)]
pub struct JettonChangeContentMessage {
    pub flavor: JettonFlavor,
    pub query_id: u64,
    pub content: ArcCell,
}

impl JettonChangeContentMessage {
    pub fn new(flavor: JettonFlavor, content: ArcCell) -> Self {
        JettonChangeContentMessage {
            flavor,
            query_id: 0,
            content,
        }
    }

    /// Jetton 2.0 `change_metadata_url` pointing the minter to `uri`.
    pub fn metadata_url(uri: &str) -> Result<Self, JettonMessageError> {
        validate_metadata_uri(uri)?;
        let content = snake_string_cell(None, uri)?;
        Ok(Self::new(JettonFlavor::V2, content.to_arc()))
    }

    /// The new metadata URI of a `V2` message.
    pub fn new_metadata_url(&self) -> Result<String, JettonMessageError> {
        if self.flavor != JettonFlavor::V2 {
            return Err(JettonMessageError::invalid_body(
                self.opcode(),
                self.query_id,
                "Classic content is not a metadata url",
            ));
        }
        let bytes = load_snake_bytes(&self.content, 0)?;
        String::from_utf8(bytes).map_err(|e| {
            JettonMessageError::invalid_body(
                self.opcode(),
                self.query_id,
                format!("Metadata url is not valid UTF-8: {}", e),
            )
        })
    }
}

impl TonMessage for JettonChangeContentMessage {
    fn build(&self) -> Result<Cell, JettonMessageError> {
        let mut message = CellBuilder::new();
        message.store_u32(32, self.flavor.change_content_opcode())?;
        message.store_u64(64, self.query_id)?;
        message.store_reference(&self.content)?;
        Ok(message.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, JettonMessageError> {
        let mut parser = cell.parser();
        let mut refs = RefReader::new(cell);
        let (opcode, query_id) = load_header(&mut parser)?;
        let flavor = JettonFlavor::from_change_content_opcode(opcode)
            .ok_or_else(|| unknown_opcode(opcode, query_id, "change_content"))?;
        parser.ensure_empty()?;
        let content = refs.next_ref()?;
        refs.ensure_empty()?;

        Ok(JettonChangeContentMessage {
            flavor,
            query_id,
            content,
        })
    }
}

impl HasOpcode for JettonChangeContentMessage {
    fn opcode(&self) -> u32 {
        self.flavor.change_content_opcode()
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

    use tonlib_core::TonAddress;

    use crate::content::build_offchain_content;
    use crate::message::*;
    use crate::types::JettonFlavor;

    const NEW_ADMIN: &str = "EQAd8QRKoA5sKcug9bwK6vMdmhSAoAxr8vvABvC1TCeTude5";

    #[test]
    fn test_change_admin_per_flavor() -> Result<(), JettonMessageError> {
        let new_admin = TonAddress::from_str(NEW_ADMIN).unwrap();
        for (flavor, opcode) in [
            (JettonFlavor::Classic, JETTON_CHANGE_ADMIN),
            (JettonFlavor::V2, JETTON_V2_CHANGE_ADMIN),
        ] {
            let mut message = JettonChangeAdminMessage::new(flavor, &new_admin);
            message.with_query_id(11);
            let cell = message.build()?;
            assert_eq!(cell.parser().load_u32(32)?, opcode);
            assert_eq!(cell.bit_len(), 32 + 64 + 267);
            assert_eq!(JettonChangeAdminMessage::parse(&cell)?, message);
        }
        Ok(())
    }

    #[test]
    fn test_claim_and_drop_admin() -> Result<(), JettonMessageError> {
        let mut claim = JettonClaimAdminMessage::new();
        claim.with_query_id(5);
        let claim_cell = claim.build()?;
        assert_eq!(claim_cell.bit_len(), 96);
        assert_eq!(claim_cell.parser().load_u32(32)?, JETTON_V2_CLAIM_ADMIN);
        assert_eq!(JettonClaimAdminMessage::parse(&claim_cell)?, claim);

        let drop_cell = JettonDropAdminMessage::new().build()?;
        assert_eq!(drop_cell.parser().load_u32(32)?, JETTON_V2_DROP_ADMIN);
        assert!(matches!(
            JettonClaimAdminMessage::parse(&drop_cell),
            Err(JettonMessageError::InvalidMessage(_))
        ));
        Ok(())
    }

    #[test]
    fn test_change_content_classic() -> Result<(), JettonMessageError> {
        let content = build_offchain_content("https://example.com/new.json")?.to_arc();
        let message = JettonChangeContentMessage::new(JettonFlavor::Classic, content.clone());
        let cell = message.build()?;
        assert_eq!(cell.parser().load_u32(32)?, JETTON_CHANGE_CONTENT);
        assert_eq!(cell.reference(0)?, &content);

        let parsed = JettonChangeContentMessage::parse(&cell)?;
        assert_eq!(parsed, message);
        assert!(parsed.new_metadata_url().is_err());
        Ok(())
    }

    #[test]
    fn test_change_metadata_url() -> Result<(), JettonMessageError> {
        let uri = "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
        let message = JettonChangeContentMessage::metadata_url(uri)?;
        let cell = message.build()?;
        assert_eq!(cell.parser().load_u32(32)?, JETTON_V2_CHANGE_METADATA_URL);

        let parsed = JettonChangeContentMessage::parse(&cell)?;
        assert_eq!(parsed.flavor, JettonFlavor::V2);
        assert_eq!(parsed.new_metadata_url()?, uri);

        assert!(matches!(
            JettonChangeContentMessage::metadata_url("ftp://example.com/jetton.json"),
            Err(JettonMessageError::ContentError(_))
        ));
        Ok(())
    }
}
