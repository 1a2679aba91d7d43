use cosmwasm_std::{
    entry_point, to_binary, BankMsg, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult, Timestamp,
};

use crate::error::ContractError;
use crate::msg::{
    BalanceResponse, ExecuteMsg, InstantiateMsg, IsLockedResponse, LockInfoResponse,
    OwnerResponse, QueryMsg, TimeLeftResponse, UnlockTimeResponse,
};
use crate::state::{add_coins, State, FUNDS, STATE};

use cw2::set_contract_version;

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:cw-timelock";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.unlock_time.le(&env.block.time) {
        return Err(ContractError::UnlockTimeInPast {});
    }

    let state = State {
        owner: info.sender,
        unlock_time: msg.unlock_time,
    };
    STATE.save(deps.storage, &state)?;
    FUNDS.save(deps.storage, &info.funds)?;

    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Withdraw {} => try_withdraw(deps, env, info),
        ExecuteMsg::Lock { unlock_time } => try_lock(deps, env, info, unlock_time),
    }
}

pub fn try_withdraw(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let state = STATE.load(deps.storage)?;

    if info.sender != state.owner {
        return Err(ContractError::Unauthorized {});
    }

    if env.block.time.lt(&state.unlock_time) {
        return Err(ContractError::TooEarly {});
    }

    let funds = FUNDS.load(deps.storage)?;
    if funds.is_empty() {
        return Err(ContractError::EmptyBalance {});
    }

    // empty the balance in the same transaction as the transfer
    FUNDS.save(deps.storage, &vec![])?;

    let res = Response::new()
        .add_attribute("action", "withdraw")
        .add_attribute("to", state.owner.clone())
        .add_attribute("amount", coins_string(&funds))
        .add_message(BankMsg::Send {
            to_address: state.owner.into(),
            amount: funds,
        });
    Ok(res)
}

pub fn try_lock(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    unlock_time: Timestamp,
) -> Result<Response, ContractError> {
    let mut state = STATE.load(deps.storage)?;

    // only the owner may deposit and move the unlock time; anyone else
    // could otherwise push the unlock out and stall the withdrawal
    if info.sender != state.owner {
        return Err(ContractError::Unauthorized {});
    }

    if info.funds.is_empty() {
        return Err(ContractError::EmptyBalance {});
    }

    if unlock_time.le(&env.block.time) {
        return Err(ContractError::UnlockTimeInPast {});
    }

    let mut funds = FUNDS.load(deps.storage)?;

    // an active lock may only be extended, never shortened
    if !funds.is_empty() && unlock_time.lt(&state.unlock_time) {
        return Err(ContractError::CannotShortenLock {});
    }

    add_coins(&mut funds, &info.funds);
    state.unlock_time = unlock_time;

    STATE.save(deps.storage, &state)?;
    FUNDS.save(deps.storage, &funds)?;

    let res = Response::new()
        .add_attribute("action", "lock")
        .add_attribute("from", info.sender)
        .add_attribute("unlock_time", unlock_time.seconds().to_string());
    Ok(res)
}

fn coins_string(funds: &[Coin]) -> String {
    funds
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Owner {} => to_binary(&query_owner(deps)?),
        QueryMsg::UnlockTime {} => to_binary(&query_unlock_time(deps)?),
        QueryMsg::IsLocked {} => to_binary(&query_is_locked(deps)?),
        QueryMsg::Balance {} => to_binary(&query_balance(deps)?),
        QueryMsg::TimeLeft {} => to_binary(&query_time_left(deps, env)?),
        QueryMsg::LockInfo {} => to_binary(&query_lock_info(deps, env)?),
    }
}

fn query_owner(deps: Deps) -> StdResult<OwnerResponse> {
    let state = STATE.load(deps.storage)?;
    Ok(OwnerResponse { owner: state.owner })
}

fn query_unlock_time(deps: Deps) -> StdResult<UnlockTimeResponse> {
    let state = STATE.load(deps.storage)?;
    Ok(UnlockTimeResponse {
        unlock_time: state.unlock_time,
    })
}

fn query_is_locked(deps: Deps) -> StdResult<IsLockedResponse> {
    let funds = FUNDS.load(deps.storage)?;
    Ok(IsLockedResponse {
        locked: !funds.is_empty(),
    })
}

fn query_balance(deps: Deps) -> StdResult<BalanceResponse> {
    let funds = FUNDS.load(deps.storage)?;
    Ok(BalanceResponse { funds })
}

fn query_time_left(deps: Deps, env: Env) -> StdResult<TimeLeftResponse> {
    let state = STATE.load(deps.storage)?;
    Ok(TimeLeftResponse {
        seconds: time_left(&state, &env),
    })
}

fn query_lock_info(deps: Deps, env: Env) -> StdResult<LockInfoResponse> {
    let state = STATE.load(deps.storage)?;
    let funds = FUNDS.load(deps.storage)?;

    Ok(LockInfoResponse {
        time_left: time_left(&state, &env),
        locked: !funds.is_empty(),
        owner: state.owner,
        unlock_time: state.unlock_time,
        funds,
    })
}

fn time_left(state: &State, env: &Env) -> u64 {
    state
        .unlock_time
        .seconds()
        .saturating_sub(env.block.time.seconds())
}
