use thiserror::Error;

/// Returned by the value-extracting accessors when a required slot holds
/// no value. Absence itself is not an error; only the `get*` and
/// `require*` operations turn it into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmptyValueError {
    /// The single tracked value is missing.
    #[error("no value is present")]
    Value,
    /// The first of the two tracked values is missing.
    #[error("the first value is not present")]
    First,
    /// The second of the two tracked values is missing.
    #[error("the second value is not present")]
    Second,
    /// At least one of the two tracked values is missing.
    #[error("one or more of the two values are not present")]
    Pair,
}
