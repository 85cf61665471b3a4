//! Review-session configuration for Recheck.
//!
//! A [`SessionConfig`] is an explicit object constructed per review session:
//! the platform API URL plus one [`Profile`] per participant. It is passed to
//! whatever layer issues platform calls instead of living in module-global
//! state, so two sessions never share or clobber credentials.
//!
//! Tokens are opaque [`ApiToken`] values that redact themselves from `Debug`
//! and `Display` output. [`ApiOutcome`] classifies platform response statuses,
//! keeping "expected non-standard success" (a 204 reply) distinct from
//! genuine failure.

pub mod config;
pub mod error;
pub mod outcome;
pub mod profile;

pub use config::{SessionConfig, DEFAULT_API_URL};
pub use error::{SessionError, SessionResult};
pub use outcome::ApiOutcome;
pub use profile::{ApiToken, Profile, Role};
