//! Types and helpers shared by every module: the error type, unit
//! conversion and XML text escaping.

pub mod error;
pub mod unit;
pub mod xml;

pub use error::{Error, Result};
