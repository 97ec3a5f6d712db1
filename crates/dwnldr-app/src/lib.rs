//! # dwnldr-app - Application State and Orchestration
//!
//! TEA (The Elm Architecture) layer of the control panel. Owns the
//! application state, turns messages into state transitions and actions,
//! and runs the actions against the backend API.
//!
//! ## Public API
//!
//! ### Engine
//! - [`Engine`] - Owns state, message channel and pollers
//!
//! ### TEA Pattern
//! - [`AppState`] - Complete application state (the Model)
//! - [`Message`] - All possible events and actions
//! - [`handler::update()`] - State transition function
//! - [`UpdateAction`] - Side effects returned by `update()`
//!
//! ### Configuration
//! - [`config::Settings`] - `config.toml`
//! - [`config::PreferencesStore`] - Persisted manual IP override and OS tab
//!
//! ### Input
//! - [`InputKey`] - Terminal-independent key events

pub mod actions;
pub mod clipboard;
pub mod config;
pub mod engine;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod poller;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use poller::{PollerKind, Pollers};
pub use state::{AppState, Focus, UiMode};
