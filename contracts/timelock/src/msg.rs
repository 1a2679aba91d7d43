use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Timestamp};

#[cw_serde]
pub struct InstantiateMsg {
    /// Timestamp after which the owner may withdraw. Must be in the future.
    pub unlock_time: Timestamp,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Withdraw the full held balance to the owner, once unlocked
    Withdraw {},
    /// Deposit the attached funds and move the unlock timestamp
    Lock { unlock_time: Timestamp },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the owner address
    #[returns(OwnerResponse)]
    Owner {},
    /// Returns the unlock timestamp
    #[returns(UnlockTimeResponse)]
    UnlockTime {},
    /// Returns whether funds are still held
    #[returns(IsLockedResponse)]
    IsLocked {},
    /// Returns the held funds
    #[returns(BalanceResponse)]
    Balance {},
    /// Returns seconds until unlock, 0 once reached
    #[returns(TimeLeftResponse)]
    TimeLeft {},
    /// Returns the full lock state in one call
    #[returns(LockInfoResponse)]
    LockInfo {},
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[cw_serde]
pub struct UnlockTimeResponse {
    pub unlock_time: Timestamp,
}

#[cw_serde]
pub struct IsLockedResponse {
    pub locked: bool,
}

#[cw_serde]
pub struct BalanceResponse {
    pub funds: Vec<Coin>,
}

#[cw_serde]
pub struct TimeLeftResponse {
    pub seconds: u64,
}

#[cw_serde]
pub struct LockInfoResponse {
    pub owner: Addr,
    pub unlock_time: Timestamp,
    pub funds: Vec<Coin>,
    pub locked: bool,
    pub time_left: u64,
}
