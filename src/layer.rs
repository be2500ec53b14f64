//! # Layer Trait
//!
//! Tower-style middleware composition for filesystems.
//!
//! ## Overview
//!
//! A [`Layer`] turns one filesystem into another, typically by wrapping it.
//! [`LoggingLayer`](crate::LoggingLayer) is the layer shipped with this crate.
//!
//! ```text
//! Filesystem ──▶ Layer::layer() ──▶ Wrapped Filesystem
//! ```
//!
//! ## Fluent Composition
//!
//! [`LayerExt`] adds `.layer()` to every filesystem:
//!
//! ```rust
//! use logfs::{Basic, LayerExt, LoggingLayer, MemoryFs};
//! use std::path::Path;
//!
//! let fs = MemoryFs::new().layer(LoggingLayer::new(|line: &str| println!("{line}")));
//! fs.create(Path::new("/hello.txt")).unwrap();
//! ```

use crate::Filesystem;

/// A layer that wraps a filesystem to add functionality.
///
/// # Type Parameters
///
/// - `B`: The filesystem type being wrapped
///
/// # Design Notes
///
/// - `layer(self, backend)` consumes both the layer and the filesystem
/// - Layers are compile-time composition and are not object-safe
///
/// # Example
///
/// ```rust
/// use logfs::{Filesystem, Layer};
///
/// struct Tagged<B> {
///     inner: B,
///     tag: &'static str,
/// }
///
/// struct TagLayer(&'static str);
///
/// impl<B: Filesystem> Layer<B> for TagLayer {
///     type Backend = Tagged<B>;
///
///     fn layer(self, backend: B) -> Self::Backend {
///         Tagged { inner: backend, tag: self.0 }
///     }
/// }
/// ```
pub trait Layer<B> {
    /// The resulting filesystem type after applying this layer.
    type Backend;

    /// Wrap the given filesystem with this layer's functionality.
    fn layer(self, backend: B) -> Self::Backend;
}

/// Extension trait for fluent layer composition.
///
/// Provides `.layer()` on any [`Filesystem`].
pub trait LayerExt: Filesystem + Sized {
    /// Apply a layer to this filesystem.
    fn layer<L: Layer<Self>>(self, layer: L) -> L::Backend {
        layer.layer(self)
    }
}

// Blanket implementation - any Filesystem gets LayerExt for free
impl<B: Filesystem> LayerExt for B {}
