//! Metadata catalog for resolving references found in form markup.
//!
//! - [`catalog`]: the in-memory [`MetadataCatalog`] implementing
//!   [`formshare_model::LookupService`]
//! - [`loader`]: loading a catalog from a directory of CSV files
//! - [`paths`]: catalog directory resolution

#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod loader;
pub mod paths;

pub use crate::catalog::{CatalogEntry, MetadataCatalog};
pub use crate::error::{CatalogError, Result};
pub use crate::loader::load_catalog;
pub use crate::paths::{CATALOG_ENV_VAR, resolve_catalog_root};
