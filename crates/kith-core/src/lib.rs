//! Core types and the contact engine for the Kith contact book.
//!
//! This crate is deliberately free of file-format and CLI dependencies.
//! Storage backends implement [`store::Backend`]; front ends drive a
//! [`store::ContactStore`] and render what its queries return.

pub mod contact;
pub mod error;
pub mod export;
pub mod search;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
