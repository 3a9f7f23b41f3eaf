use std::io::Write;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use jetton_minter_core::code::{cell_to_boc_b64, jetton_minter_v2_code, jetton_wallet_v2_code};
use jetton_minter_core::content::{build_offchain_content, build_onchain_content};
use jetton_minter_core::message::{DeployMessage, DeployRequest, JettonMintMessage, TonMessage};
use jetton_minter_core::minter::{jetton_wallet_address, JettonMinterData, JettonMinterDataV2};
use jetton_minter_core::units::{format_units, to_nano, whole_units, DEFAULT_DEPLOY_AMOUNT};
use jetton_minter_core::{ArcCell, Cell, JettonFlavor, StateInit, TonAddress};
use num_bigint::BigUint;

use crate::config::{parse_code, ContentConfig, DeployConfig};

/// Everything a wallet needs to deploy a minter, derived from a [`DeployConfig`].
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    pub flavor: JettonFlavor,
    pub admin: TonAddress,
    pub minter_address: TonAddress,
    pub admin_wallet: TonAddress,
    pub state_init: StateInit,
    pub initial_supply: BigUint,
    pub mint: Option<Cell>,
    pub message: DeployMessage,
    pub request: DeployRequest,
}

impl DeploymentPlan {
    pub fn from_config(config: &DeployConfig) -> anyhow::Result<DeploymentPlan> {
        config.validate()?;
        let admin = TonAddress::from_str(&config.admin)
            .map_err(|e| anyhow!("Invalid admin address {}: {}", config.admin, e))?;
        let (minter_code, wallet_code) = load_codes(config)?;

        let state_init = match (&config.flavor, &config.content) {
            (JettonFlavor::Classic, content) => {
                let content = match content {
                    ContentConfig::Offchain { uri } => build_offchain_content(uri)?,
                    ContentConfig::Onchain { keys, metadata } => {
                        build_onchain_content(metadata, *keys)?
                    }
                };
                JettonMinterData::new(&admin, content.to_arc(), wallet_code.clone())
                    .state_init(&minter_code)?
            }
            (JettonFlavor::V2, ContentConfig::Offchain { uri }) => {
                JettonMinterDataV2::new(&admin, wallet_code.clone(), uri)
                    .state_init(&minter_code)?
            }
            (JettonFlavor::V2, ContentConfig::Onchain { .. }) => {
                return Err(anyhow!("Jetton 2.0 minters keep a metadata url"));
            }
        };
        let minter_address = state_init.contract_address(config.workchain)?;
        let admin_wallet = jetton_wallet_address(
            config.flavor,
            &admin,
            &minter_address,
            &wallet_code,
            config.workchain,
        )?;

        let initial_supply = whole_units(config.initial_supply, config.decimals());
        let mint = if config.initial_supply > 0 {
            Some(JettonMintMessage::new(config.flavor, &admin, &initial_supply).build()?)
        } else {
            None
        };

        let deploy_amount = match &config.deploy_amount {
            Some(amount) => to_nano(amount)?,
            None => DEFAULT_DEPLOY_AMOUNT.clone(),
        };
        let mut message =
            DeployMessage::for_state_init(&state_init, config.workchain, &deploy_amount)?;
        if let Some(mint) = &mint {
            message.with_body(mint.clone().to_arc());
        }
        let request = DeployRequest::from_message(&message)?;

        log::info!(
            "{} minter of {} will be deployed at {}",
            config.flavor,
            admin,
            minter_address
        );
        Ok(DeploymentPlan {
            flavor: config.flavor,
            admin,
            minter_address,
            admin_wallet,
            state_init,
            initial_supply,
            mint,
            message,
            request,
        })
    }

    pub fn print(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(out, "Jetton minter ({})", self.flavor)?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out, "Minter address:       {}", self.minter_address.to_base64_url())?;
        writeln!(out, "Minter address (raw): {}", self.minter_address.to_hex())?;
        writeln!(out, "Admin jetton wallet:  {}", self.admin_wallet.to_base64_url())?;
        writeln!(out, "StateInit: {}", cell_to_boc_b64(&self.state_init.build()?)?)?;
        if let Some(mint) = &self.mint {
            writeln!(out, "Mint payload: {}", cell_to_boc_b64(mint)?)?;
        }
        writeln!(out, "TonConnect request:")?;
        writeln!(out, "{}", serde_json::to_string_pretty(&self.request)?)?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out, "Next steps:")?;
        writeln!(
            out,
            "1. Send {} TON with the StateInit above to {}",
            format_units(&self.message.value, 9),
            self.minter_address.to_base64_url()
        )?;
        writeln!(out, "2. Wait until the minter account becomes active")?;
        if self.mint.is_some() {
            writeln!(
                out,
                "3. The attached mint credits {} elementary units to {}",
                self.initial_supply,
                self.admin.to_base64_url()
            )?;
        } else {
            writeln!(
                out,
                "3. Send a mint message from {} once the minter is deployed",
                self.admin.to_base64_url()
            )?;
        }
        Ok(())
    }
}

fn load_codes(config: &DeployConfig) -> anyhow::Result<(ArcCell, ArcCell)> {
    let minter_code = match (&config.minter_code, config.flavor) {
        (Some(code), _) => parse_code(code).context("Invalid minter_code")?,
        (None, JettonFlavor::V2) => jetton_minter_v2_code()?,
        (None, JettonFlavor::Classic) => return Err(anyhow!("minter_code is required")),
    };
    let wallet_code = match (&config.wallet_code, config.flavor) {
        (Some(code), _) => parse_code(code).context("Invalid wallet_code")?,
        (None, JettonFlavor::V2) => jetton_wallet_v2_code()?,
        (None, JettonFlavor::Classic) => return Err(anyhow!("wallet_code is required")),
    };
    Ok((minter_code, wallet_code))
}
