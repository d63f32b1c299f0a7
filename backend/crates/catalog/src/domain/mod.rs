//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Movie, Genre, MovieDetail)
//! - Domain value objects (MovieDraft, CatalogSnapshot)
//! - Domain services (poster lookup interface)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
