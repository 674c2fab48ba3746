//! # mzdex-search
//!
//! Adaptive search over tables whose layout is only known at runtime.
//!
//! A request flows through:
//! - [`resolver`]: find the domain table (canonical name, then keywords)
//! - [`inspector`]: read its columns for this request
//! - [`plan`]: build one predicate from text, mass window and field filters
//! - [`executor`]: count and page the matches inside one read scope
//!
//! [`engine::SearchEngine`] ties these together and also drives batch mass
//! annotation ([`annotate`]) and the health report ([`health`]).

pub mod annotate;
pub mod csv_input;
pub mod engine;
pub mod error;
pub mod executor;
pub mod health;
pub mod inspector;
pub mod plan;
pub mod resolver;

pub use annotate::AnnotateOptions;
pub use engine::SearchEngine;
pub use error::SearchError;
