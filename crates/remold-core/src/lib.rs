//! Remold Core - Schema-driven reshaping engine for structured data
//!
//! This crate decouples an internal data representation from an external
//! payload shape: given a source value and a declarative schema of
//! output-key → source-key correspondences, it produces a new keyed mapping
//! (or a sequence of mappings) whose keys and nesting follow the schema
//! rather than the source's own shape.
//!
//! # Main Components
//!
//! - **Source Model**: a closed value type over records, keyed mappings,
//!   collections, references, and opaque scalars, built at the call boundary
//! - **Schema Model**: declarative projections, buildable in code or loaded
//!   from JSON
//! - **Reshaping Engine**: schema-directed recursive descent with explicit
//!   depth bounding
//! - **Boundary Adapters**: `serde_json` conversions in and out, plus the
//!   [`ToSource`] trait for user types
//!
//! # Example
//!
//! ```
//! use remold_core::{reshape, Record, ReshapeOptions, Schema, SourceValue, TagTable};
//!
//! # fn main() -> remold_core::Result<()> {
//! let tags = TagTable::new()
//!     .with_tag("name", "json", "name")
//!     .with_tag("email", "json", "email");
//!
//! let user: SourceValue = Record::new("User", tags)
//!     .with_field("name", "John doe")
//!     .with_field("email", "johndoe@example.com")
//!     .into();
//!
//! let schema = Schema::new()
//!     .map("username", "name")
//!     .map("useremail", "email");
//!
//! let result = reshape(&user, &schema, &ReshapeOptions::default())?
//!     .expect("user is present");
//!
//! let projection = result.as_map().expect("record input yields a map");
//! assert_eq!(projection.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod json;
pub mod options;
pub mod output;
pub mod reshape;
pub mod schema;
pub mod value;

mod proptest_strategies;

// Re-export main types for convenience
pub use error::{Error, Result, TagPolicy};
pub use options::ReshapeOptions;
pub use output::{Projection, Reshaped};
pub use reshape::{reshape, Reshaper};
pub use schema::{Schema, SchemaField};
pub use value::{Kind, Record, RecordField, Scalar, SourceValue, TagTable, ToSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
