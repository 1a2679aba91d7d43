#![cfg(test)]

use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage};
use cosmwasm_std::{Addr, Binary, Coin, Env, OwnedDeps, Timestamp};

use cw_timelock::contract;
use cw_timelock::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};

use crate::error::AppError;
use crate::provider::{ChainProvider, TxResponse};

/// Single-contract chain simulation backed by the real contract code.
/// Block time can be advanced and failure modes injected, which is all
/// the client and deploy layers need for their tests.
pub struct MockChain {
    deps: OwnedDeps<MockStorage, MockApi, MockQuerier>,
    env: Env,
    sender: Option<Addr>,
    contract: Addr,
    tx_count: u64,
    pub confirmations_waited: u64,
    pub verify_ok: bool,
    pub reject_writes: bool,
    pub reject_queries: bool,
}

impl MockChain {
    pub fn new(start_time: u64) -> Self {
        let mut env = mock_env();
        env.block.time = Timestamp::from_seconds(start_time);
        MockChain {
            deps: mock_dependencies(),
            contract: env.contract.address.clone(),
            env,
            sender: None,
            tx_count: 0,
            confirmations_waited: 0,
            verify_ok: true,
            reject_writes: false,
            reject_queries: false,
        }
    }

    /// Point the wallet at an account, as if the extension were unlocked.
    pub fn connect_as(&mut self, sender: &str) {
        self.sender = Some(Addr::unchecked(sender));
    }

    /// Simulate a missing wallet extension.
    pub fn remove_wallet(&mut self) {
        self.sender = None;
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.env.block.time = self.env.block.time.plus_seconds(seconds);
    }

    pub fn now(&self) -> Timestamp {
        self.env.block.time
    }

    fn signer(&self) -> Result<Addr, AppError> {
        self.sender.clone().ok_or(AppError::WalletUnavailable {})
    }

    fn next_tx(&mut self) -> TxResponse {
        self.tx_count += 1;
        self.env.block.height += 1;
        TxResponse {
            txhash: format!("TX{:04}", self.tx_count),
            height: self.env.block.height,
        }
    }
}

impl ChainProvider for MockChain {
    fn account(&self) -> Result<Addr, AppError> {
        self.signer()
    }

    fn instantiate(
        &mut self,
        _code_id: u64,
        msg: &InstantiateMsg,
        funds: &[Coin],
        _label: &str,
    ) -> Result<Addr, AppError> {
        let sender = self.signer()?;
        let info = mock_info(sender.as_str(), funds);
        contract::instantiate(self.deps.as_mut(), self.env.clone(), info, msg.clone())
            .map_err(|err| AppError::TransactionRejected(err.to_string()))?;
        self.next_tx();
        Ok(self.contract.clone())
    }

    fn execute(
        &mut self,
        _contract: &Addr,
        msg: &ExecuteMsg,
        funds: &[Coin],
    ) -> Result<TxResponse, AppError> {
        let sender = self.signer()?;
        if self.reject_writes {
            return Err(AppError::TransactionRejected("rejected by user".to_string()));
        }
        let info = mock_info(sender.as_str(), funds);
        contract::execute(self.deps.as_mut(), self.env.clone(), info, msg.clone())
            .map_err(|err| AppError::TransactionRejected(err.to_string()))?;
        Ok(self.next_tx())
    }

    fn query(&self, _contract: &Addr, msg: &QueryMsg) -> Result<Binary, AppError> {
        if self.reject_queries {
            return Err(AppError::QueryFailed("node unreachable".to_string()));
        }
        contract::query(self.deps.as_ref(), self.env.clone(), msg.clone())
            .map_err(|err| AppError::QueryFailed(err.to_string()))
    }

    fn wait_for_confirmations(&mut self, blocks: u64) -> Result<(), AppError> {
        self.confirmations_waited += blocks;
        self.env.block.height += blocks;
        Ok(())
    }

    fn verify_source(&self, contract: &Addr) -> Result<(), AppError> {
        if self.verify_ok {
            Ok(())
        } else {
            Err(AppError::VerificationFailed(format!(
                "explorer rejected {}",
                contract
            )))
        }
    }
}
