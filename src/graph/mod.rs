//! Composable graph nodes built on the `dsp` primitives.
//!
//! A voice is a small chain of nodes (oscillator → envelope → gain) that
//! renders one note in blocks and reacts to note on/off.

/// Signal × modulator, and fixed gain.
pub mod amplify;
/// ADSR envelope node.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.gain()`).
pub mod extensions;
/// Core trait and render context shared by all nodes.
pub mod node;
/// Pitched oscillator node.
pub mod oscillator;

pub use extensions::NodeExt;
pub use node::{GraphNode, RenderCtx};
