//! Section loaders that render portfolio content into a host page.
//!
//! Ten independent loaders fetch their documents concurrently, normalize the
//! historical JSON shapes, and write markup into the host page's elements.
//! A failing loader leaves only its own section unrendered.

pub mod behaviors;
pub mod bootstrap;
pub mod dom;
pub mod loader;
pub mod markup;
pub mod source;
pub mod targets;
pub mod traits;

pub use behaviors::{Behaviors, Effect, UiEvent};
pub use bootstrap::{App, BootstrapReport, RenderedPage};
pub use dom::{escape_html, HostDocument, Selector};
pub use loader::{fetch_section, load_section, render_section, LoadError, LoadOutcome, SectionReport};
pub use markup::Fragments;
pub use source::{DirSource, HttpSource, MemorySource};
pub use targets::{Page, RenderTargets, Target};
pub use traits::{ContentSource, FetchError};
