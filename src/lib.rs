//! # Keysort
//!
//! `keysort` sorts any slice by a key derived from each element, under a pluggable
//! ordering policy, and copies containers with element conversion.
//!
//! The sorter works in two phases: it extracts one key per element and normalizes all
//! keys in a single pass, then sorts an index permutation by comparing the normalized
//! keys and applies that permutation to the data. Keys are computed once, no matter
//! how many comparisons the sort makes.
//!
//! ## Key Features
//!
//! - **Natural ordering**: [`NaturalPolicy`] compares embedded numbers by value, so
//!   `"item-2" < "item-10" < "item-100"`.
//! - **Version ordering**: [`VersionPolicy`] treats every `.` as a separator, so
//!   `"2.3" < "2.10" < "10.1"`.
//! - **Key extractors**: sort by the value itself, a named field ([`FieldAccess`]), a
//!   map key, a position, or any closure.
//! - **All or nothing**: a failed sort leaves the data in its original order, a failed
//!   copy leaves the destination unchanged.
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! ```rust
//! use keysort::Sorter;
//!
//! let mut data = vec!["item-10", "item-2", "item-100"];
//!
//! // Default policy: plain string order.
//! Sorter::new().sort(&mut data)?;
//! assert_eq!(data, vec!["item-10", "item-100", "item-2"]);
//!
//! // Natural order.
//! Sorter::new().natural().sort(&mut data)?;
//! assert_eq!(data, vec!["item-2", "item-10", "item-100"]);
//! # Ok::<(), keysort::Error>(())
//! ```
//!
//! ### Records
//!
//! ```rust
//! use keysort::prelude::*;
//!
//! struct Person {
//!     name: &'static str,
//!     height: u32,
//! }
//!
//! impl FieldAccess for Person {
//!     fn field(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "Name" => Some(self.name.into()),
//!             "Height" => Some(self.height.into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut people = vec![
//!     Person { name: "James", height: 74 },
//!     Person { name: "Dave", height: 76 },
//!     Person { name: "Jaime", height: 78 },
//! ];
//!
//! Sorter::new().by_field("Name").sort(&mut people)?;
//! assert_eq!(people[0].name, "Dave");
//!
//! Sorter::new().by_field("Height").values().descending().sort(&mut people)?;
//! assert_eq!(people[0].name, "Jaime");
//! # Ok::<(), keysort::Error>(())
//! ```
//!
//! ### Copying
//!
//! ```rust
//! use keysort::prelude::*;
//!
//! let mut widened: Vec<f64> = Vec::new();
//! vec![1i32, 2, 3].copy_into(&mut widened)?;
//! assert_eq!(widened, vec![1.0, 2.0, 3.0]);
//! # Ok::<(), keysort::Error>(())
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Comparisons**: O(N log N), stable merge sort over indices.
//! - **Key work**: exactly one extraction and one normalization per element.
//! - **Memory Overhead**: the raw and normalized keys, one `usize` index per element,
//!   and a merge buffer.

pub mod algo;
pub mod copy;
pub mod core;
pub mod error;
pub mod policy;
pub mod token;
pub mod value;

pub use crate::algo::{Direction, Sorter};
pub use crate::copy::{Container, CopyInto, copy_value, copy_value_as};
pub use crate::core::{ByField, ByIndex, ByMapKey, ByValue, FieldAccess, KeyExtractor, TryKey};
pub use crate::error::{Error, Result};
pub use crate::policy::{NaturalPolicy, OrdPolicy, OrderingPolicy, StringPolicy, ValuePolicy, VersionPolicy};
pub use crate::token::{Token, tokenize, tokenize_version};
pub use crate::value::{Kind, Value};

pub mod prelude {
    pub use crate::algo::{Direction, Sorter};
    pub use crate::copy::{Container, CopyInto};
    pub use crate::core::{FieldAccess, KeyExtractor};
    pub use crate::error::{Error, Result};
    pub use crate::policy::OrderingPolicy;
    pub use crate::value::{Kind, Value};
}
