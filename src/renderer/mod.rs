//! WebGPU rendering module
//!
//! `scene` builds a colored triangle list in canvas pixels from the game
//! state; `pipeline` uploads it and draws it.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::{Frame, bird_visible, build};
pub use vertex::Vertex;
