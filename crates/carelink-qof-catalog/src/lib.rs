//! Declarative QOF indicator catalog
//!
//! An [`IndicatorCatalog`] is a versioned, immutable table of clinical
//! quality indicators. Each indicator couples an applicability predicate
//! over the patient snapshot with a per-patient check and the policies
//! that turn a failed check into a prioritized clinical action.
//!
//! Catalogs are constructed in code (see [`builtin`]) or loaded from
//! JSON. Validation is all-or-nothing: a duplicate id or malformed entry
//! rejects the whole catalog, never a subset.

pub mod builtin;
mod catalog;
mod indicator;

pub use builtin::builtin_catalog;
pub use catalog::{CatalogError, IndicatorCatalog};
pub use indicator::{Applicability, Check, DuePolicy, Indicator};
