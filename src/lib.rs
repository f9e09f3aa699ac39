//! modex: explorer core for model-output catalogs.
//!
//! The crate owns the joined (experiment × variable) metadata table, the
//! faceted visibility state that a set of interactive selectors drives, and
//! the available/chosen transfer model used to assemble variable filters.
//! The widget toolkit, the catalog database and the notebook runtime stay
//! outside: the toolkit renders the typed view-state in
//! [`explore::controls`] and calls the controller handlers on value
//! changes, and the database is reached through the
//! [`catalog::source::CatalogSource`] trait.
//!
//! Typical embedding:
//!
//! ```
//! use std::sync::Arc;
//! use modex::catalog::memory::MemoryCatalog;
//! use modex::catalog::source::CatalogSource;
//! use modex::{CatalogIndex, DatabaseExplorer};
//!
//! let source: Arc<dyn CatalogSource> =
//!     Arc::new(MemoryCatalog::new(Vec::new(), Vec::new()));
//! let index = Arc::new(CatalogIndex::build(source, None).unwrap());
//! let explorer = DatabaseExplorer::new(index, Default::default());
//! assert!(explorer.experiment_list.is_empty());
//! ```

pub mod catalog;
pub mod config;
pub mod explore;
pub mod logging;
pub mod model;

pub use catalog::index::CatalogIndex;
pub use catalog::source::{ArrayHandle, CatalogError, CatalogSource};
pub use config::ExplorerConfig;
pub use explore::ExploreError;
pub use explore::database::DatabaseExplorer;
pub use explore::experiment::ExperimentExplorer;
