#![forbid(unsafe_code)]
#![recursion_limit = "131072"]

//! Tolerant deep navigation of nested collections
//!
//! This crate resolves composite path expressions against in-memory trees of
//! maps and sequences mixed arbitrarily (e.g., parsed JSON), replacing
//! hand-written nested loops and lookups with a single expression. Paths mix
//! plain keys, slices, wildcards, and deep wildcards; wildcard branches that
//! lack the requested shape are skipped rather than failing the whole query.
//!
//! A path with no fan-out step yields one value; once a wildcard, deep
//! wildcard, or ranged key is involved the result is a single flat list,
//! never nested, no matter how many fan-out steps the path contains.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use treepath::{path, Resolver};
//!
//! let root = json!({
//!     "things": [
//!         {"id": 0, "name": "cat", "properties": {"hat": true}},
//!         {"id": 1, "name": "thing1"},
//!         {"id": 2, "name": "thing2", "properties": {"volume": 11}},
//!     ],
//! });
//! let resolver = Resolver::new(&root);
//!
//! // A chain of plain keys resolves to a single value.
//! let id = resolver.resolve(path!["things", 1, "id"])?;
//! assert_eq!(id.as_one(), Some(&json!(1)));
//!
//! // A wildcard fans out over every element and flattens the results.
//! let names = resolver.resolve(path!["things", *, "name"])?;
//! assert_eq!(
//!     names.into_vec(),
//!     vec![&json!("cat"), &json!("thing1"), &json!("thing2")],
//! );
//!
//! // Elements without the requested key are skipped, not errors.
//! let props = resolver.resolve(path!["things", *, "properties"])?;
//! assert_eq!(props.len(), 2);
//!
//! // A deep wildcard searches every nesting level.
//! let hats = resolver.resolve(path![**, "hat"])?;
//! assert_eq!(hats.into_vec(), vec![&json!(true)]);
//!
//! // Tuples work as paths too; `..` is the wildcard, ranges select windows.
//! let late_names = resolver.resolve(("things", 1.., "name"))?;
//! assert_eq!(late_names.into_vec(), vec![&json!("thing1"), &json!("thing2")]);
//! # Ok::<(), treepath::Error>(())
//! ```
//!
//! Failures are contextual: a missing key as a direct step of resolution is
//! an error, while the same missing key encountered through a wildcard only
//! drops that branch. See [`Error::is_skippable`].
//!
//! Collections are accessed through the [`Tree`] trait; implementations for
//! `serde_json::Value` (always) and `serde_yaml::Value` (feature `yaml`) are
//! provided.

pub mod error;
pub mod path;
pub mod resolver;
pub mod tree;

mod json;
#[cfg(feature = "yaml")]
mod yaml;

// Re-export main types
pub use error::{Error, Result};
pub use path::{Key, Path, Slice, Step};
pub use resolver::{resolve, Resolved, ResolveOptions, Resolver, TrailingDeep};
pub use tree::Tree;
