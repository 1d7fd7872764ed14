//! Error types for grid-sendtx
//!
//! Configuration, encoding and network failures all surface as `eyre` reports
//! with context attached at the boundary where they happen.

pub use eyre::{eyre, Context, Report, Result};
