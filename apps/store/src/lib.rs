//! RetroGo storefront data layer
//!
//! Catalog, customer, order and cart records with the integrity rules of
//! the storefront schema: field constraints, unique customer email, and
//! per-relation delete behavior (cascade, protect, set null). Storage is
//! provided by [`infrastructure::repositories::PostgresStore`] or the
//! in-process [`infrastructure::repositories::InMemoryStore`].

pub mod config;
pub mod domain;
pub mod infrastructure;
