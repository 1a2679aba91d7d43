use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Coin, Timestamp};
use cw_storage_plus::Item;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct State {
    pub owner: Addr,
    pub unlock_time: Timestamp,
}

pub const STATE: Item<State> = Item::new("state");
pub const FUNDS: Item<Vec<Coin>> = Item::new("funds");

/// Merge coins into the held balance, summing amounts per denom.
pub fn add_coins(funds: &mut Vec<Coin>, add: &[Coin]) {
    for token in add {
        let index = funds.iter().enumerate().find_map(|(i, exist)| {
            if exist.denom == token.denom {
                Some(i)
            } else {
                None
            }
        });
        match index {
            Some(idx) => funds[idx].amount += token.amount,
            None => funds.push(token.clone()),
        }
    }
}
