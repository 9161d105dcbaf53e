//! Handler registry system for manifest parsing.
//!
//! Every manifest section is owned by a [`ManifestHandler`] registered under
//! the section's key. The [`ManifestParser`] runs the registered handlers in
//! two phases and collects their typed outputs into a [`ManifestDataMap`].

mod core;
mod engine;
mod handler;
mod types;

pub use self::core::ManifestHandlerRegistry;
pub use engine::ManifestParser;
pub use handler::ManifestHandler;
pub use types::{downcast_data, ManifestData, ManifestDataMap, Validation};
