//! # Hydration
//!
//! The engine that turns flat rows into nested records, together with the
//! per-entity metadata cache, the strictness checks and the registration
//! enforcer it consults.
//!
//! ## Depth bounds
//!
//! Every call carries a [`HydrationContext`]. A record is populated while
//! `current_depth <= max_depth`; nested entities are hydrated one level
//! deeper and skipped silently once the bound is passed, which also stops
//! cyclic relations between two entities.

pub mod context;
pub mod enforcer;
pub mod engine;
pub mod metadata;
mod strictness;
pub mod view;

pub use context::HydrationContext;
pub use enforcer::{EnforcementViolation, Enforcer};
pub use engine::Hydrator;
pub use metadata::{EntityMetadata, MetadataCache};
pub use view::View;
