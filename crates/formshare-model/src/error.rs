use thiserror::Error;

use crate::reference::ReferenceKind;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("empty external id for {0} reference")]
    EmptyExternalId(ReferenceKind),
    #[error("unknown reference kind: {0}")]
    UnknownReferenceKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
