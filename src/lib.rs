//! # mail-forge – Rich HTML → email-safe HTML transpiler
//!
//! This crate turns the HTML produced by a rich-text editor into a complete
//! email document. Two dialects are supported:
//!
//! - **Responsive** – inline styles are computed per element ([`inline`]),
//!   top-level blocks become rows of a presentation table ([`rows`]) and
//!   the result is wrapped in a `<div>` + `<style>` document.
//! - **Legacy** – Outlook hints and HTML attributes are added to the tree
//!   ([`legacy`]) and the body is wrapped in nested tables with MSO
//!   conditional comments and VML image fallbacks ([`document`]).
//!
//! The transpiler ([`pipeline`]) never fails and performs no I/O. The
//! collaborators around it ([`import`], [`payload`], [`export`],
//! [`render`]) report failures through [`ForgeError`] / [`render::RenderError`].
//!
//! A C-compatible FFI surface is exposed via the [`ffi`] module.

pub mod config;
pub mod css;
pub mod document;
pub mod dom;
pub mod error;
pub mod export;
pub mod ffi;
pub mod image_ref;
pub mod import;
pub mod inline;
pub mod legacy;
pub mod payload;
pub mod pipeline;
pub mod policy;
pub mod render;
pub mod rows;
pub mod templates;

// Re-exports for convenience
pub use config::{Dialect, EmailTemplateConfig};
pub use error::ForgeError;
pub use pipeline::{generate_email, generate_full_email_html};
