//! Content digesting for Recheck.
//!
//! Provides domain-separated BLAKE3 digesting of byte slices, readers, and
//! files. Readers are consumed in fixed-size chunks so memory use stays
//! bounded regardless of file size, and the chunked digest is identical to
//! the digest of the whole content.

pub mod digester;

pub use digester::{DigestError, DigestResult, Digester, CHUNK_SIZE};
