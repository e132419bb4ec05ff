//! Fixed-aspect-ratio noise viewer.
//!
//! The crate renders a continuously regenerated grayscale noise image as
//! a textured quad that letterboxes or pillarboxes itself to keep the
//! image aspect ratio on window resizes.  The fitting math lives in
//! [`fit`] and is pure, so it can be reused (and tested) without a GPU;
//! the wgpu plumbing around it sits in [`render`].

pub mod app;
pub mod fit;
pub mod noise;
pub mod render;

pub use app::{fit_summary, WindowViewport};
pub use fit::{fit, ortho, ContentSize, FitError, FittedRect, Viewport};
pub use noise::NoiseImage;
pub use render::Renderer;
