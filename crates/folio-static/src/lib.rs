//! Static site generator for folio portfolios.
//!
//! Renders the host page ahead of time with every section loader, copies the
//! site's static files, and emits the UI behaviors script.

pub mod assets;
pub mod builder;
pub mod templates;

pub use assets::{AssetPipeline, BEHAVIORS_SCRIPT_PATH};
pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use templates::{HostPageContext, TemplateEngine};
