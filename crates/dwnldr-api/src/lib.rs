//! dwnldr-api - HTTP client for the dwnldr file-share backend
//!
//! The backend owns the file listener, its access log, LAN IP detection and
//! the per-OS command files. This crate wraps its JSON endpoints in typed
//! async calls returning [`dwnldr_core::Result`].

pub mod client;
pub mod wire;


pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use wire::FileList;
