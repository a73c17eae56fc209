use thiserror::Error;

pub type NzResult<T> = Result<T, NzError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NzError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
