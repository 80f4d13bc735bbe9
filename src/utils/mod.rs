//! The `utils` module holds definitions shared across `topicsub`: the error
//! types every layer reports and the logging bootstrap used by the binary.

pub mod error;
pub mod logging;
