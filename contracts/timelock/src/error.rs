use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Unlock time should be in the future")]
    UnlockTimeInPast {},

    #[error("You can't withdraw yet")]
    TooEarly {},

    #[error("Empty Balance")]
    EmptyBalance {},

    #[error("Cannot shorten an active lock")]
    CannotShortenLock {},
}
