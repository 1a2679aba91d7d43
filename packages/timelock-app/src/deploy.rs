use std::fs;
use std::path::{Path, PathBuf};

use cosmwasm_std::Coin;
use serde::{Deserialize, Serialize};

use cw_timelock::msg::InstantiateMsg;

use crate::artifact::DeployedContracts;
use crate::error::AppError;
use crate::provider::ChainProvider;

/// Blocks to wait on public networks before requesting verification.
pub const CONFIRMATION_DEPTH: u64 = 6;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Local,
    Testnet,
    Mainnet,
}

impl Network {
    pub fn is_public(&self) -> bool {
        !matches!(self, Network::Local)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeployConfig {
    pub network: Network,
    /// Code id of the uploaded timelock wasm.
    pub code_id: u64,
    pub label: String,
    /// Where to persist the deployed address for the front end.
    pub artifact_path: PathBuf,
}

impl DeployConfig {
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

/// Instantiate the timelock and persist its address. On public networks
/// waits for [`CONFIRMATION_DEPTH`] blocks and then requests source
/// verification; a failed verification is surfaced in the log but does
/// not fail the deployment.
pub fn deploy<P: ChainProvider>(
    provider: &mut P,
    config: &DeployConfig,
    msg: &InstantiateMsg,
    funds: &[Coin],
) -> Result<DeployedContracts, AppError> {
    log::info!(
        "deploying timelock (code id {}) to {:?}",
        config.code_id,
        config.network
    );
    let address = provider.instantiate(config.code_id, msg, funds, &config.label)?;
    log::info!("timelock deployed at {}", address);

    if config.network.is_public() {
        provider.wait_for_confirmations(CONFIRMATION_DEPTH)?;
        match provider.verify_source(&address) {
            Ok(()) => log::info!("source verified for {}", address),
            Err(err) => log::warn!("{}", err),
        }
    }

    let record = DeployedContracts {
        lock: address.into(),
    };
    record.write(&config.artifact_path)?;
    log::info!("address saved to {}", config.artifact_path.display());

    Ok(record)
}
