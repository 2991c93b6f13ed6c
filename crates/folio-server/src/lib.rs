//! Development server with live reload for folio sites.
//!
//! Renders the host page on every request so document edits show up
//! immediately, and pushes reload messages over a WebSocket when files in the
//! site directory change.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{HmrHub, HmrMessage};
