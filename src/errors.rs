use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The line does not match the accepted record grammar. Every malformed
    /// shape collapses into this one signal; the caller decides how to
    /// report the offending line.
    #[error("malformed attribute record")]
    MalformedRecord,
}
