//! Foundation types for Recheck.
//!
//! This crate provides the identifier and error types shared by every other
//! Recheck crate.
//!
//! # Key Types
//!
//! - [`ContentDigest`] -- Content-addressed digest of a file's bytes (BLAKE3)
//! - [`RunId`] -- UUID v7 identifier for a single comparison run
//! - [`TypeError`] -- Errors from parsing and converting these types

pub mod digest;
pub mod error;
pub mod run;

pub use digest::ContentDigest;
pub use error::TypeError;
pub use run::RunId;
