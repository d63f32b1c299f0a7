//! Value Object Module

pub mod claims;
pub mod email;
pub mod user_id;
pub mod user_password;
