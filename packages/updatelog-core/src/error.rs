use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("allocation invariant violated: {0}")]
    AllocationInvariant(String),
    #[error("entry update info is missing a resolved entry id")]
    MissingEntryId,
}
