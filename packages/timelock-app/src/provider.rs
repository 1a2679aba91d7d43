use cosmwasm_std::{from_binary, Addr, Binary, Coin};
use serde::de::DeserializeOwned;

use cw_timelock::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};

use crate::error::AppError;

/// Acknowledgment that a transaction was accepted by the network.
/// Acceptance is not finality; callers that need a confirmation depth
/// go through [`ChainProvider::wait_for_confirmations`].
#[derive(Debug, Clone, PartialEq)]
pub struct TxResponse {
    pub txhash: String,
    pub height: u64,
}

/// Boundary to the wallet and the chain. The wallet holds the keys and
/// signs on the caller's behalf; everything behind this trait is an
/// opaque collaborator.
pub trait ChainProvider {
    /// Request access to the wallet's active account.
    fn account(&self) -> Result<Addr, AppError>;

    /// Instantiate a timelock from an uploaded code id, attaching funds.
    fn instantiate(
        &mut self,
        code_id: u64,
        msg: &InstantiateMsg,
        funds: &[Coin],
        label: &str,
    ) -> Result<Addr, AppError>;

    /// Sign and submit a state-mutating call, blocking until the network
    /// acknowledges it.
    fn execute(
        &mut self,
        contract: &Addr,
        msg: &ExecuteMsg,
        funds: &[Coin],
    ) -> Result<TxResponse, AppError>;

    /// Issue a view call. No side effects.
    fn query(&self, contract: &Addr, msg: &QueryMsg) -> Result<Binary, AppError>;

    /// Block until the given number of blocks have been produced on top
    /// of the latest transaction.
    fn wait_for_confirmations(&mut self, blocks: u64) -> Result<(), AppError>;

    /// Ask the network's explorer to verify the deployed source.
    fn verify_source(&self, contract: &Addr) -> Result<(), AppError>;
}

/// Query the contract and decode the response.
pub fn query_contract<P, T>(provider: &P, contract: &Addr, msg: &QueryMsg) -> Result<T, AppError>
where
    P: ChainProvider,
    T: DeserializeOwned,
{
    let bin = provider.query(contract, msg)?;
    from_binary(&bin).map_err(|err| AppError::QueryFailed(err.to_string()))
}
