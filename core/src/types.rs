use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::message::{
    JETTON_CHANGE_ADMIN, JETTON_CHANGE_CONTENT, JETTON_MINT, JETTON_V2_CHANGE_ADMIN,
    JETTON_V2_CHANGE_METADATA_URL, JETTON_V2_MINT,
};

/// Generation of the jetton contracts a payload is built for.
///
/// `Classic` matches the minter/wallet pair with `mint#15` and on-cell content,
/// `V2` matches the official `jetton-2.0` contracts which keep a metadata URI
/// and a two-step admin transfer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum JettonFlavor {
    #[default]
    Classic,
    V2,
}

impl JettonFlavor {
    pub fn mint_opcode(&self) -> u32 {
        match self {
            JettonFlavor::Classic => JETTON_MINT,
            JettonFlavor::V2 => JETTON_V2_MINT,
        }
    }

    pub fn change_admin_opcode(&self) -> u32 {
        match self {
            JettonFlavor::Classic => JETTON_CHANGE_ADMIN,
            JettonFlavor::V2 => JETTON_V2_CHANGE_ADMIN,
        }
    }

    pub fn change_content_opcode(&self) -> u32 {
        match self {
            JettonFlavor::Classic => JETTON_CHANGE_CONTENT,
            JettonFlavor::V2 => JETTON_V2_CHANGE_METADATA_URL,
        }
    }

    pub fn from_mint_opcode(opcode: u32) -> Option<JettonFlavor> {
        match opcode {
            JETTON_MINT => Some(JettonFlavor::Classic),
            JETTON_V2_MINT => Some(JettonFlavor::V2),
            _ => None,
        }
    }

    pub fn from_change_admin_opcode(opcode: u32) -> Option<JettonFlavor> {
        match opcode {
            JETTON_CHANGE_ADMIN => Some(JettonFlavor::Classic),
            JETTON_V2_CHANGE_ADMIN => Some(JettonFlavor::V2),
            _ => None,
        }
    }

    pub fn from_change_content_opcode(opcode: u32) -> Option<JettonFlavor> {
        match opcode {
            JETTON_CHANGE_CONTENT => Some(JettonFlavor::Classic),
            JETTON_V2_CHANGE_METADATA_URL => Some(JettonFlavor::V2),
            _ => None,
        }
    }
}
