//! Core outline logic for the notepane organizer.
//! Notebooks hold sections (optionally grouped); sections hold pages
//! (optionally nested as subpages).

pub mod catalog;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod spi;
pub mod store;

pub use catalog::{
    CatalogError, CatalogNotebook, CatalogSection, PlaceholderRenderer, StaticCatalog,
};
pub use config::{ConfigError, HeaderDefaults, LoggingConfig, OrganizerConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::node::{ForestLevel, NodeId, NodeKind, NodeValidationError, OutlineNode};
pub use model::selection::SelectionContext;
pub use service::menu::{page_menu, section_menu, MenuAction, MenuEntry};
pub use service::mutation::{page_parent, promotion_target, section_parent};
pub use service::organizer::{
    MutationOutcome, Organizer, OrganizerError, OrganizerResult, Precondition, ViewSignal,
    ViewState,
};
pub use spi::{
    ContentListing, ContentRenderer, ListingEntry, ListingError, ListingResult, NamePrompt,
    Presenter,
};
pub use store::forest::{DetachedSubtree, ForestError, OutlineForest, ParentRef, ReattachError};
pub use store::outline::OutlineStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
