//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the persistence adapters behind the catalog services.

pub mod store;
