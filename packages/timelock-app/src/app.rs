use cosmwasm_std::{Addr, Coin, Timestamp};

use cw_timelock::msg::{
    BalanceResponse, ExecuteMsg, IsLockedResponse, OwnerResponse, QueryMsg, TimeLeftResponse,
};

use crate::client::withdraw_enabled;
use crate::error::AppError;
use crate::provider::{query_contract, ChainProvider, TxResponse};

/// Contract fields the richer page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub owner: Addr,
    pub locked: bool,
    pub funds: Vec<Coin>,
    pub time_left: u64,
}

/// Stateful client behind the richer page: a lock form, a pending flag
/// that disables controls while a write is in flight, and last
/// success/error messages for the status line. Every fallible call
/// records its outcome instead of tearing the view down.
pub struct LockApp<P> {
    provider: P,
    contract: Addr,
    account: Option<Addr>,
    snapshot: Option<Snapshot>,
    pending: bool,
    last_error: Option<String>,
    last_success: Option<String>,
}

impl<P: ChainProvider> LockApp<P> {
    pub fn new(provider: P, contract: Addr) -> Self {
        LockApp {
            provider,
            contract,
            account: None,
            snapshot: None,
            pending: false,
            last_error: None,
            last_success: None,
        }
    }

    pub fn connect(&mut self) -> Result<Addr, AppError> {
        match self.provider.account() {
            Ok(account) => {
                self.account = Some(account.clone());
                Ok(account)
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn disconnect(&mut self) {
        self.account = None;
        self.snapshot = None;
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_success(&self) -> Option<&str> {
        self.last_success.as_deref()
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Re-read owner, lock status, balance and time remaining. A failed
    /// read lands in the status line like any other failure.
    pub fn refresh(&mut self) -> Result<&Snapshot, AppError> {
        match self.read_snapshot() {
            Ok(snap) => Ok(self.snapshot.insert(snap)),
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn read_snapshot(&self) -> Result<Snapshot, AppError> {
        let owner: OwnerResponse =
            query_contract(&self.provider, &self.contract, &QueryMsg::Owner {})?;
        let locked: IsLockedResponse =
            query_contract(&self.provider, &self.contract, &QueryMsg::IsLocked {})?;
        let balance: BalanceResponse =
            query_contract(&self.provider, &self.contract, &QueryMsg::Balance {})?;
        let time_left: TimeLeftResponse =
            query_contract(&self.provider, &self.contract, &QueryMsg::TimeLeft {})?;

        Ok(Snapshot {
            owner: owner.owner,
            locked: locked.locked,
            funds: balance.funds,
            time_left: time_left.seconds,
        })
    }

    /// Whether the withdraw button is enabled, per the last snapshot.
    pub fn withdraw_allowed(&self) -> bool {
        match &self.snapshot {
            Some(snap) => withdraw_enabled(
                self.account.as_ref(),
                &snap.owner,
                snap.locked,
                snap.time_left,
                self.pending,
            ),
            None => false,
        }
    }

    /// Submit the lock form: deposit funds until the given time.
    pub fn lock(&mut self, unlock_time: Timestamp, funds: &[Coin]) -> Result<TxResponse, AppError> {
        self.submit(&ExecuteMsg::Lock { unlock_time }, funds, "funds locked")
    }

    pub fn withdraw(&mut self) -> Result<TxResponse, AppError> {
        self.submit(&ExecuteMsg::Withdraw {}, &[], "withdrawal submitted")
    }

    fn submit(
        &mut self,
        msg: &ExecuteMsg,
        funds: &[Coin],
        success: &str,
    ) -> Result<TxResponse, AppError> {
        if self.account.is_none() {
            let err = AppError::NotConnected {};
            self.last_error = Some(err.to_string());
            return Err(err);
        }
        if self.pending {
            return Err(AppError::WritePending {});
        }

        self.pending = true;
        let res = self.provider.execute(&self.contract, msg, funds);
        self.pending = false;

        match res {
            Ok(tx) => {
                // acceptance by the network, not finality
                self.last_success = Some(format!("{} ({})", success, tx.txhash));
                self.last_error = None;
                // the write stands even if the re-read fails; refresh
                // records the read failure in the status line
                let _ = self.refresh();
                Ok(tx)
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                self.last_success = None;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockChain;
    use cosmwasm_std::{coin, coins};
    use cw_timelock::msg::InstantiateMsg;

    const ONE_YEAR: u64 = 365 * 24 * 60 * 60;

    fn deployed_app(owner: &str) -> LockApp<MockChain> {
        let mut chain = MockChain::new(1000);
        chain.connect_as(owner);
        let msg = InstantiateMsg {
            unlock_time: chain.now().plus_seconds(ONE_YEAR),
        };
        let contract = chain
            .instantiate(1, &msg, &coins(1_000_000_000, "ujuno"), "timelock")
            .unwrap();
        LockApp::new(chain, contract)
    }

    #[test]
    fn connect_records_wallet_error() {
        let mut app = deployed_app("creator");
        app.provider_mut().remove_wallet();

        let res = app.connect();
        match res {
            Err(AppError::WalletUnavailable {}) => {}
            _ => panic!("Must return WalletUnavailable error"),
        }
        assert_eq!(Some("No wallet provider available"), app.last_error());
        assert!(!app.is_connected());
    }

    #[test]
    fn lock_tops_up_and_refreshes() {
        let mut app = deployed_app("creator");
        app.connect().unwrap();
        app.refresh().unwrap();

        let new_unlock = app.provider_mut().now().plus_seconds(2 * ONE_YEAR);
        app.lock(new_unlock, &coins(500, "ujuno")).unwrap();

        let snap = app.snapshot().unwrap();
        assert_eq!(coins(1_000_000_500, "ujuno"), snap.funds);
        assert!(snap.locked);
        let success = app.last_success().unwrap();
        assert!(success.contains("funds locked"), "got: {}", success);
        assert!(app.last_error().is_none());
    }

    #[test]
    fn withdraw_gating_per_contract_semantics() {
        let mut app = deployed_app("creator");

        // no snapshot yet
        assert!(!app.withdraw_allowed());

        app.connect().unwrap();
        app.refresh().unwrap();
        assert!(!app.withdraw_allowed());

        app.provider_mut().advance_time(ONE_YEAR);
        app.refresh().unwrap();
        assert!(app.withdraw_allowed());

        // pending write disables the control
        app.pending = true;
        assert!(!app.withdraw_allowed());
        app.pending = false;

        // non-owner account never passes the gate
        app.provider_mut().connect_as("anyone");
        app.connect().unwrap();
        app.refresh().unwrap();
        assert!(!app.withdraw_allowed());
    }

    #[test]
    fn second_write_refused_while_pending() {
        let mut app = deployed_app("creator");
        app.connect().unwrap();

        app.pending = true;
        let res = app.withdraw();
        match res {
            Err(AppError::WritePending {}) => {}
            _ => panic!("Must return WritePending error"),
        }
    }

    #[test]
    fn failure_reason_is_extracted() {
        let mut app = deployed_app("creator");
        app.connect().unwrap();

        // too early: the revert reason lands in the status line
        let res = app.withdraw();
        assert!(res.is_err());
        let error = app.last_error().unwrap();
        assert!(error.contains("withdraw yet"), "got: {}", error);
        assert!(app.last_success().is_none());

        // user rejection in the wallet
        app.provider_mut().reject_writes = true;
        let _ = app.withdraw();
        let error = app.last_error().unwrap();
        assert!(error.contains("rejected by user"), "got: {}", error);
    }

    #[test]
    fn refresh_failure_reaches_status_line() {
        let mut app = deployed_app("creator");
        app.connect().unwrap();
        app.provider_mut().reject_queries = true;

        let res = app.refresh();
        assert!(res.is_err());
        let error = app.last_error().unwrap();
        assert!(error.contains("node unreachable"), "got: {}", error);
        assert!(app.snapshot().is_none());
    }

    #[test]
    fn write_stands_when_reread_fails() {
        let mut app = deployed_app("creator");
        app.connect().unwrap();
        app.provider_mut().advance_time(ONE_YEAR);
        app.refresh().unwrap();

        // the network accepted the withdrawal; only the re-read fails
        app.provider_mut().reject_queries = true;
        app.withdraw().unwrap();

        assert!(app.last_success().unwrap().contains("withdrawal submitted"));
        let error = app.last_error().unwrap();
        assert!(error.contains("node unreachable"), "got: {}", error);
        assert!(!app.is_pending());
    }

    #[test]
    fn owner_withdraw_full_flow() {
        let mut app = deployed_app("creator");
        app.connect().unwrap();
        app.provider_mut().advance_time(ONE_YEAR);
        app.refresh().unwrap();
        assert!(app.withdraw_allowed());

        app.withdraw().unwrap();

        let snap = app.snapshot().unwrap();
        assert!(!snap.locked);
        assert!(snap.funds.is_empty());
        assert!(!app.withdraw_allowed());
        assert!(app.last_success().unwrap().contains("withdrawal submitted"));
        assert!(!app.is_pending());
    }

    #[test]
    fn disconnect_clears_view() {
        let mut app = deployed_app("creator");
        app.connect().unwrap();
        app.refresh().unwrap();

        app.disconnect();
        assert!(!app.is_connected());
        assert!(app.snapshot().is_none());

        let res = app.withdraw();
        match res {
            Err(AppError::NotConnected {}) => {}
            _ => panic!("Must return NotConnected error"),
        }
    }

    #[test]
    fn relock_after_withdraw() {
        let mut app = deployed_app("creator");
        app.connect().unwrap();
        app.provider_mut().advance_time(ONE_YEAR);
        app.refresh().unwrap();
        app.withdraw().unwrap();

        let new_unlock = app.provider_mut().now().plus_seconds(3600);
        app.lock(new_unlock, &[coin(25, "ujuno")]).unwrap();

        let snap = app.snapshot().unwrap();
        assert!(snap.locked);
        assert_eq!(coins(25, "ujuno"), snap.funds);
        assert_eq!(3600, snap.time_left);
    }
}
