//! Shared Kernel
//!
//! Vocabulary shared by every feature crate of the movie catalog service:
//! - the unified [`error::app_error::AppError`] rendered at the HTTP boundary
//! - the [`error::kind::ErrorKind`] classification behind it
//! - typed integer IDs for the relational store's serial keys
//!
//! Only things with the same meaning in every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
