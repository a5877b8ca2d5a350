//! Record types for the four engineering datasets.
//!
//! This module defines the canonical in-memory shapes for part masters, BOM
//! rows, supplier records and the change log, plus the cross-reference index
//! tying them together.
//!
//! # Index Support
//!
//! For repeated supplier/SKU resolution, use [`CrossRefIndex`] to precompute
//! lookups:
//!
//! ```ignore
//! let bundle = load_bundle(&dir)?;
//! let index = CrossRefIndex::build(&bundle);
//!
//! // O(1) lookup instead of O(nodes)
//! let skus = index.supplied_skus("SUP-001");
//! ```

pub mod coerce;

mod bom;
mod change;
mod dataset;
mod index;
mod part;
mod supplier;

pub use bom::*;
pub use change::*;
pub use dataset::*;
pub use index::*;
pub use part::*;
pub use supplier::*;
