//! # dwnldr-core - Core Domain Types
//!
//! Foundation crate for dwnldr. Provides the domain types exchanged with the
//! file-share backend, the pure rendering logic for download commands, error
//! handling and logging setup.
//!
//! This crate has **zero internal dependencies** and performs no I/O apart
//! from logging initialization.
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`OsTab`] - Windows/Linux command context
//! - [`FileServerStatus`] - Running state and port of the file listener
//! - [`CommandSpec`], [`CommandGroup`], [`CommandItem`] - Command templates
//! - [`AccessLogEntry`], [`CodeClass`] - Listener access log rows
//!
//! ### Rendering (`template`, `url`, `serving`, `commands`)
//! - [`substitute()`] - Single-pass `{{placeholder}}` substitution
//! - [`build_url()`] - Download URL for an IP/port/base/filename
//! - [`ServingPolicy`] - Effective port and base path selection
//! - [`render_commands()`] - Resolve a whole command specification
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use dwnldr_core::prelude::*;
//! ```

pub mod commands;
pub mod error;
pub mod logging;
pub mod serving;
pub mod template;
pub mod types;
pub mod url;

/// Prelude for common imports used throughout all dwnldr crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use commands::{
    find_item, item_id, item_id_at, render_commands, render_item, RenderedGroup, RenderedItem,
};
pub use error::{Error, Result, ResultExt};
pub use serving::{
    clamp_fallback_port, DerivedInputs, ServingPolicy, DEFAULT_APP_PORT, DEFAULT_BASE_PATH,
    DEFAULT_LISTENER_PORT,
};
pub use template::{substitute, Placeholder, TemplateVars};
pub use types::{
    AccessLogEntry, CodeClass, CommandGroup, CommandItem, CommandSpec, FileServerStatus, LogCode,
    OsTab,
};
pub use url::{build_url, encode_component, normalize_base};
