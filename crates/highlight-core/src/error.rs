use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidHex(String),
}
