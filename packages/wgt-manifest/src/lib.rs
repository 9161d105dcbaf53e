//! Tizen widget manifest - Handlers and package checks for widget `config.xml`.
//!
//! This crate plugs the widget-specific handlers into the generic
//! [`manifest_parser`] engine and checks the parsed manifest against the
//! files of an unpacked widget package.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use wgt_manifest::handlers::WidgetInfo;
//! use wgt_manifest::WidgetConfigParser;
//!
//! let mut parser = WidgetConfigParser::new()?;
//! parser.parse_manifest(Path::new("widget/config.xml"))?;
//! if let Some(widget) = parser.get_manifest_data::<WidgetInfo>(WidgetInfo::KEY) {
//!     println!("{} {}", widget.id, widget.version);
//! }
//! # Ok::<(), wgt_manifest::WidgetConfigError>(())
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespaces, platform versions and profiles
//! - [`error`]: Error types and Result alias
//! - [`handlers`]: One handler per `config.xml` section
//! - [`registry`]: Registry with every widget handler
//! - [`package`]: File lookup and media types inside a widget package
//! - [`widget_config_parser`]: Manifest parsing plus package checks
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod package;
pub mod registry;
pub mod widget_config_parser;

pub use config::{PlatformConfig, Profile};
pub use error::{Result, WidgetConfigError};
pub use registry::create_widget_registry;
pub use widget_config_parser::WidgetConfigParser;
