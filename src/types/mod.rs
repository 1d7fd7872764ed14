//! Operation and result types for the user-facing API

pub mod operation;
pub mod outcome;

pub use operation::{Contract, Operation, OperationParams, ProviderRef};
pub use outcome::{Execution, SendOutcome};
