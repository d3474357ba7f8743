#![deny(missing_docs)]
//! deckmd render: layout dispatch, HTML assembly, and CSS variable
//! composition over the `deckmd-core` model.
//!
//! The entry points are [`RenderContext`] (one immutable snapshot per
//! render call) and [`render_document`] / [`render_slide`].

/// Render context and host integration seams.
pub mod context;
/// CSS variable composition and the base stylesheet.
pub mod css;
/// Document and slide assembly.
pub mod document;
/// Per-element HTML rendering.
pub mod elements;
/// Layout dispatch and templates.
pub mod layout;

pub use context::{ImageResolver, PassthroughResolver, RenderContext, RenderTarget, SvgCache};
pub use css::{BASE_STYLESHEET, compose_variables};
pub use document::{render_document, render_slide};
pub use elements::render_element;
pub use layout::images::{
    EXCALIDRAW_SCHEME, is_loading_placeholder, loading_placeholder_uri,
};
pub use layout::{LayoutKind, render_layout};
