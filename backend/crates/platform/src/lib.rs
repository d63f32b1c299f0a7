//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the feature crates:
//! - Cookie envelopes and cookie extraction
//! - Password verification (Argon2id)
//! - Bounded store calls

pub mod cookie;
pub mod deadline;
pub mod password;
