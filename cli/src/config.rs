use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use jetton_minter_core::code::{cell_from_boc_b64, cell_from_boc_hex};
use jetton_minter_core::content::{ContentKeys, JettonMetaData, DEFAULT_DECIMALS, MAX_DECIMALS};
use jetton_minter_core::state_init::BASECHAIN;
use jetton_minter_core::{ArcCell, JettonFlavor};
use serde::{Deserialize, Serialize};
use serde_aux::prelude::*;

pub const DEPLOY_CONFIG_EXAMPLE: &str = include_str!("../resources/deploy.example.json");

/// Description of a minter deployment, read from JSON.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DeployConfig {
    #[serde(default)]
    pub flavor: JettonFlavor,
    #[serde(default = "default_workchain")]
    pub workchain: i32,
    pub admin: String,
    pub content: ContentConfig,
    /// Compiled minter as a hex or base64 BoC. Jetton 2.0 falls back to the bundled code.
    #[serde(default)]
    pub minter_code: Option<String>,
    #[serde(default)]
    pub wallet_code: Option<String>,
    /// Whole tokens minted to the admin along with the deployment.
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub initial_supply: u64,
    /// Overrides the decimals of off-chain content (on-chain content carries its own).
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub decimals: Option<u8>,
    /// TON attached to the deployment, e.g. `"0.2"`.
    #[serde(default)]
    pub deploy_amount: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentConfig {
    Offchain {
        uri: String,
    },
    Onchain {
        #[serde(default)]
        keys: ContentKeys,
        metadata: JettonMetaData,
    },
}

fn default_workchain() -> i32 {
    BASECHAIN
}

impl DeployConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<DeployConfig> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read deploy config {}", path.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("Invalid deploy config {}", path.display()))?;
        log::debug!("Loaded {} deploy config from {}", config.flavor, path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> anyhow::Result<DeployConfig> {
        let config: DeployConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match (&self.flavor, &self.content) {
            (JettonFlavor::V2, ContentConfig::Onchain { .. }) => {
                return Err(anyhow!(
                    "Jetton 2.0 minters keep a metadata url, use offchain content"
                ));
            }
            (_, ContentConfig::Onchain { metadata, .. }) => metadata.ensure_valid()?,
            _ => {}
        }
        if let Some(decimals) = self.decimals {
            if decimals > MAX_DECIMALS {
                return Err(anyhow!(
                    "decimals must be between 0 and {}, got {}",
                    MAX_DECIMALS,
                    decimals
                ));
            }
        }
        if self.flavor == JettonFlavor::Classic
            && (self.minter_code.is_none() || self.wallet_code.is_none())
        {
            return Err(anyhow!(
                "Classic deployments need both minter_code and wallet_code"
            ));
        }
        Ok(())
    }

    pub fn decimals(&self) -> u8 {
        match &self.content {
            ContentConfig::Onchain { metadata, .. } => metadata.decimals,
            ContentConfig::Offchain { .. } => self.decimals.unwrap_or(DEFAULT_DECIMALS),
        }
    }
}

/// Parses a code BoC given either as hex or as base64.
pub fn parse_code(boc: &str) -> anyhow::Result<ArcCell> {
    let boc = boc.trim();
    let cell = if !boc.is_empty() && boc.chars().all(|c| c.is_ascii_hexdigit()) {
        cell_from_boc_hex(boc)?
    } else {
        cell_from_boc_b64(boc)?
    };
    Ok(cell)
}
