use std::path::Path;

use cosmwasm_std::{Addr, Timestamp};

use cw_timelock::msg::{
    ExecuteMsg, IsLockedResponse, OwnerResponse, QueryMsg, TimeLeftResponse, UnlockTimeResponse,
};

use crate::artifact::DeployedContracts;
use crate::error::AppError;
use crate::provider::{query_contract, ChainProvider, TxResponse};

/// Withdraw gating shared by both client variants. It mirrors what the
/// contract enforces on-chain: only the owner, only once the unlock
/// time has passed, and only while funds are held. `pending` keeps the
/// control disabled while a write is in flight.
pub fn withdraw_enabled(
    account: Option<&Addr>,
    owner: &Addr,
    locked: bool,
    time_left: u64,
    pending: bool,
) -> bool {
    !pending && locked && time_left == 0 && account == Some(owner)
}

/// Contract fields the minimal page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractInfo {
    pub owner: Addr,
    pub unlock_time: Timestamp,
    pub locked: bool,
    pub time_left: u64,
}

/// Script-style client: connect the wallet, show owner and unlock
/// time, withdraw. The snapshot is re-read after every write.
pub struct LockClient<P> {
    provider: P,
    contract: Addr,
    account: Option<Addr>,
    info: Option<ContractInfo>,
}

impl<P: ChainProvider> LockClient<P> {
    pub fn new(provider: P, contract: Addr) -> Self {
        LockClient {
            provider,
            contract,
            account: None,
            info: None,
        }
    }

    /// Build a client from the address artifact the deploy step wrote.
    pub fn from_artifact(provider: P, path: &Path) -> Result<Self, AppError> {
        let record = DeployedContracts::load(path)?;
        Ok(Self::new(provider, Addr::unchecked(record.lock)))
    }

    /// Request account access from the wallet.
    pub fn connect(&mut self) -> Result<Addr, AppError> {
        let account = self.provider.account()?;
        self.account = Some(account.clone());
        Ok(account)
    }

    pub fn account(&self) -> Option<&Addr> {
        self.account.as_ref()
    }

    pub fn info(&self) -> Option<&ContractInfo> {
        self.info.as_ref()
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Re-read the displayed fields.
    pub fn refresh(&mut self) -> Result<&ContractInfo, AppError> {
        let owner: OwnerResponse =
            query_contract(&self.provider, &self.contract, &QueryMsg::Owner {})?;
        let unlock: UnlockTimeResponse =
            query_contract(&self.provider, &self.contract, &QueryMsg::UnlockTime {})?;
        let locked: IsLockedResponse =
            query_contract(&self.provider, &self.contract, &QueryMsg::IsLocked {})?;
        let time_left: TimeLeftResponse =
            query_contract(&self.provider, &self.contract, &QueryMsg::TimeLeft {})?;

        let info = ContractInfo {
            owner: owner.owner,
            unlock_time: unlock.unlock_time,
            locked: locked.locked,
            time_left: time_left.seconds,
        };
        Ok(self.info.insert(info))
    }

    /// Whether the withdraw control should be shown, per the last
    /// refreshed snapshot.
    pub fn withdraw_available(&self) -> bool {
        match &self.info {
            Some(info) => withdraw_enabled(
                self.account.as_ref(),
                &info.owner,
                info.locked,
                info.time_left,
                false,
            ),
            None => false,
        }
    }

    pub fn withdraw(&mut self) -> Result<TxResponse, AppError> {
        if self.account.is_none() {
            return Err(AppError::NotConnected {});
        }
        let tx = self
            .provider
            .execute(&self.contract, &ExecuteMsg::Withdraw {}, &[])?;
        self.refresh()?;
        Ok(tx)
    }
}
