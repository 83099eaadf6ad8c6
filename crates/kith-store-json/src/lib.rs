//! JSON flat-file backend for the Kith contact book.
//!
//! The whole record set lives in one pretty-printed JSON array. Every save
//! rewrites the file through a sibling temporary file, so a failed write
//! leaves the previous contents in place.

mod encode;
mod store;

pub mod error;

pub use encode::{decode_file, encode_file};
pub use error::{Error, Result};
pub use store::JsonFileBackend;
