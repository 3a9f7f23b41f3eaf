use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use jetton_minter_core::code::{cell_to_boc_b64, jetton_wallet_v2_code};
use jetton_minter_core::content::{
    build_offchain_content, build_onchain_content, ContentKeys, JettonMetaData, DEFAULT_DECIMALS,
};
use jetton_minter_core::message::{HasOpcode, JettonMintMessage, TonMessage};
use jetton_minter_core::minter::jetton_wallet_address;
use jetton_minter_core::state_init::BASECHAIN;
use jetton_minter_core::units::{parse_units, to_nano};
use jetton_minter_core::{Cell, JettonFlavor, TonAddress};

use crate::config::{parse_code, DeployConfig, DEPLOY_CONFIG_EXAMPLE};
use crate::deploy::DeploymentPlan;

/// Jetton minter payload builder
#[derive(Parser, Debug)]
#[command(name = "jetton-minter")]
#[command(about = "Builds Jetton minter deployment and mint payloads", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a TEP-64 content cell
    #[command(subcommand)]
    Content(ContentCommand),
    /// Print the JSON document to host behind an off-chain metadata URI
    Metadata {
        #[command(flatten)]
        metadata: MetaDataArgs,
    },
    /// Derive the minter address and the deployment message from a JSON config
    Deploy {
        /// Path to the deploy config
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print a sample deploy config
    ExampleConfig,
    /// Build a mint message body
    Mint {
        #[arg(short, long, default_value_t = JettonFlavor::Classic)]
        flavor: JettonFlavor,
        /// Owner of the receiving jetton wallet
        #[arg(short, long)]
        to: String,
        /// Amount in whole tokens, e.g. "1000.5"
        #[arg(short, long)]
        amount: String,
        #[arg(short, long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u8,
        #[arg(short, long, default_value_t = 0)]
        query_id: u64,
        /// TON attached for the minter to forward, e.g. "0.05"
        #[arg(long)]
        ton_amount: Option<String>,
    },
    /// Derive the jetton wallet address of an owner
    WalletAddress {
        #[arg(short, long, default_value_t = JettonFlavor::Classic)]
        flavor: JettonFlavor,
        #[arg(short, long)]
        owner: String,
        #[arg(short, long)]
        minter: String,
        /// Wallet code as a hex or base64 BoC. Jetton 2.0 falls back to the bundled code.
        #[arg(short, long)]
        wallet_code: Option<String>,
        #[arg(long, default_value_t = BASECHAIN, allow_negative_numbers = true)]
        workchain: i32,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContentCommand {
    /// Off-chain layout: the cell carries only a metadata URI
    Offchain {
        #[arg(short, long)]
        uri: String,
    },
    /// On-chain layout: the cell carries the metadata dictionary
    Onchain {
        #[command(flatten)]
        metadata: MetaDataArgs,
        /// Semi-chain URI, stored with sha256 keys only
        #[arg(short, long)]
        uri: Option<String>,
        #[arg(short, long, default_value_t = ContentKeys::Indexed)]
        keys: ContentKeys,
    },
}

#[derive(clap::Args, Debug)]
pub struct MetaDataArgs {
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub symbol: String,
    #[arg(short, long, default_value_t = DEFAULT_DECIMALS)]
    pub decimals: u8,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub image: Option<String>,
}

impl MetaDataArgs {
    fn to_metadata(&self) -> Result<JettonMetaData> {
        let mut metadata = JettonMetaData::new(&self.name, &self.symbol, self.decimals);
        if let Some(description) = &self.description {
            metadata.with_description(description);
        }
        if let Some(image) = &self.image {
            metadata.with_image(image);
        }
        metadata.ensure_valid()?;
        Ok(metadata)
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn execute(&self, out: &mut dyn Write) -> Result<()> {
        match &self.command {
            Commands::Content(ContentCommand::Offchain { uri }) => {
                print_cell(out, "Content", &build_offchain_content(uri)?)
            }
            Commands::Content(ContentCommand::Onchain {
                metadata,
                uri,
                keys,
            }) => {
                let mut metadata = metadata.to_metadata()?;
                if let Some(uri) = uri {
                    if *keys == ContentKeys::Indexed {
                        return Err(anyhow!(
                            "--uri needs --keys sha256, indexed keys have no uri"
                        ));
                    }
                    metadata.with_uri(uri);
                }
                print_cell(out, "Content", &build_onchain_content(&metadata, *keys)?)
            }
            Commands::Metadata { metadata } => {
                writeln!(out, "{}", metadata.to_metadata()?.to_json()?)?;
                Ok(())
            }
            Commands::Deploy { config } => {
                let config = DeployConfig::from_file(config)?;
                DeploymentPlan::from_config(&config)?.print(out)
            }
            Commands::ExampleConfig => {
                write!(out, "{}", DEPLOY_CONFIG_EXAMPLE)?;
                Ok(())
            }
            Commands::Mint {
                flavor,
                to,
                amount,
                decimals,
                query_id,
                ton_amount,
            } => {
                let destination = parse_address(to)?;
                let amount = parse_units(amount, *decimals)?;
                let mut mint = JettonMintMessage::new(*flavor, &destination, &amount);
                mint.with_query_id(*query_id);
                if let Some(ton_amount) = ton_amount {
                    mint.with_ton_amount(&to_nano(ton_amount)?);
                }
                log::debug!("Mint message: {:?}", mint);
                print_cell(out, "Mint", &mint.build()?)
            }
            Commands::WalletAddress {
                flavor,
                owner,
                minter,
                wallet_code,
                workchain,
            } => {
                let wallet_code = match (wallet_code, flavor) {
                    (Some(code), _) => parse_code(code).context("Invalid wallet code")?,
                    (None, JettonFlavor::V2) => jetton_wallet_v2_code()?,
                    (None, JettonFlavor::Classic) => {
                        return Err(anyhow!("Classic wallets need --wallet-code"))
                    }
                };
                let address = jetton_wallet_address(
                    *flavor,
                    &parse_address(owner)?,
                    &parse_address(minter)?,
                    &wallet_code,
                    *workchain,
                )?;
                writeln!(out, "Jetton wallet:       {}", address.to_base64_url())?;
                writeln!(out, "Jetton wallet (raw): {}", address.to_hex())?;
                Ok(())
            }
        }
    }
}

fn parse_address(address: &str) -> Result<TonAddress> {
    TonAddress::from_str(address).map_err(|e| anyhow!("Invalid address {}: {}", address, e))
}

fn print_cell(out: &mut dyn Write, what: &str, cell: &Cell) -> Result<()> {
    writeln!(out, "{} BoC:  {}", what, cell_to_boc_b64(cell)?)?;
    writeln!(out, "{} hash: {}", what, cell.cell_hash().to_hex())?;
    Ok(())
}
