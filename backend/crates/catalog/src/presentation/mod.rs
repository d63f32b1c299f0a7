//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{AdminAppState, CatalogAppState, home};
pub use router::{admin_router, admin_router_generic, catalog_router, catalog_router_generic};
