use num_bigint::BigUint;
use tonlib_core::cell::{ArcCell, Cell, CellBuilder};
use tonlib_core::TonAddress;

use super::MinterError;
use crate::state_init::StateInit;
use crate::types::JettonFlavor;
use crate::util::ensure_reference_count;

/// Initial storage of a jetton wallet, as its minter computes it.
///
/// ```raw
/// wallet_data$_ balance:Coins owner_address:MsgAddress
///               jetton_master_address:MsgAddress jetton_wallet_code:^Cell = WalletData;
/// wallet_data_v2$_ status:uint4 balance:Coins owner_address:MsgAddress
///                  jetton_master_address:MsgAddress = WalletData;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum JettonWalletData {
    Classic {
        balance: BigUint,
        owner: TonAddress,
        master: TonAddress,
        wallet_code: ArcCell,
    },
    V2 {
        status: u8,
        balance: BigUint,
        owner: TonAddress,
        master: TonAddress,
    },
}

impl JettonWalletData {
    /// Empty wallet of `owner` for the jettons of `master`.
    pub fn new(
        flavor: JettonFlavor,
        owner: &TonAddress,
        master: &TonAddress,
        wallet_code: &ArcCell,
    ) -> Self {
        match flavor {
            JettonFlavor::Classic => JettonWalletData::Classic {
                balance: BigUint::default(),
                owner: owner.clone(),
                master: master.clone(),
                wallet_code: wallet_code.clone(),
            },
            JettonFlavor::V2 => JettonWalletData::V2 {
                status: 0,
                balance: BigUint::default(),
                owner: owner.clone(),
                master: master.clone(),
            },
        }
    }

    pub fn flavor(&self) -> JettonFlavor {
        match self {
            JettonWalletData::Classic { .. } => JettonFlavor::Classic,
            JettonWalletData::V2 { .. } => JettonFlavor::V2,
        }
    }

    pub fn owner(&self) -> &TonAddress {
        match self {
            JettonWalletData::Classic { owner, .. } | JettonWalletData::V2 { owner, .. } => owner,
        }
    }

    pub fn build(&self) -> Result<Cell, MinterError> {
        let mut builder = CellBuilder::new();
        match self {
            JettonWalletData::Classic {
                balance,
                owner,
                master,
                wallet_code,
            } => {
                builder.store_coins(balance)?;
                builder.store_address(owner)?;
                builder.store_address(master)?;
                builder.store_reference(wallet_code)?;
            }
            JettonWalletData::V2 {
                status,
                balance,
                owner,
                master,
            } => {
                builder.store_u8(4, *status)?;
                builder.store_coins(balance)?;
                builder.store_address(owner)?;
                builder.store_address(master)?;
            }
        }
        Ok(builder.build()?)
    }

    pub fn parse(flavor: JettonFlavor, cell: &Cell) -> Result<Self, MinterError> {
        let mut parser = cell.parser();
        let result = match flavor {
            JettonFlavor::Classic => {
                let balance = parser.load_coins()?;
                let owner = parser.load_address()?;
                let master = parser.load_address()?;
                ensure_reference_count(cell, 1)?;
                JettonWalletData::Classic {
                    balance,
                    owner,
                    master,
                    wallet_code: cell.reference(0)?.clone(),
                }
            }
            JettonFlavor::V2 => {
                let status = parser.load_u8(4)?;
                let balance = parser.load_coins()?;
                let owner = parser.load_address()?;
                let master = parser.load_address()?;
                ensure_reference_count(cell, 0)?;
                JettonWalletData::V2 {
                    status,
                    balance,
                    owner,
                    master,
                }
            }
        };
        parser.ensure_empty()?;
        Ok(result)
    }

    pub fn state_init(&self, wallet_code: &ArcCell) -> Result<StateInit, MinterError> {
        if let JettonWalletData::Classic {
            wallet_code: stored,
            ..
        } = self
        {
            if stored != wallet_code {
                log::warn!("Wallet code differs from the code kept in the wallet data");
            }
        }
        Ok(StateInit::new(wallet_code.clone(), self.build()?.to_arc()))
    }
}

/// Address of the jetton wallet `minter` deploys for `owner`.
pub fn jetton_wallet_address(
    flavor: JettonFlavor,
    owner: &TonAddress,
    minter: &TonAddress,
    wallet_code: &ArcCell,
    workchain: i32,
) -> Result<TonAddress, MinterError> {
    let data = JettonWalletData::new(flavor, owner, minter, wallet_code);
    let address = data.state_init(wallet_code)?.contract_address(workchain)?;
    log::debug!(
        "{} jetton wallet of {} at {} is {}",
        flavor,
        owner,
        minter,
        address
    );
    Ok(address)
}
