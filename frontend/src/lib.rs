//! Scroll, reveal, menu and contact interactions for static marketing pages.
//!
//! The pure modules decide what should happen; [`dom`] (wasm only) binds
//! them to the page.

pub mod anchor;
pub mod config;
pub mod contact;
pub mod counter;
pub mod error;
pub mod header;
pub mod hover;
pub mod panel;
pub mod reveal;
pub mod route;
pub mod typing;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use config::{Preset, SiteConfig};
pub use error::{FxError, Result};
