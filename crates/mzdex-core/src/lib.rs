//! # mzdex-core
//!
//! Core types and error types for mzdex.
//!
//! This crate provides the foundational types shared across all mzdex crates:
//! - Cell values and column-ordered records decoded from arbitrary tables
//! - Search requests, field filters, and sort keys
//! - The store-independent [`predicate::Predicate`] tree
//! - ppm tolerance windows and pagination accounting
//! - Response types for search, annotation, and health introspection
//! - Cross-cutting error types

pub mod errors;
pub mod pagination;
pub mod predicate;
pub mod request;
pub mod responses;
pub mod schema;
pub mod tolerance;
pub mod values;
