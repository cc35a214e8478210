//! Key events to sustained chord voices.
//!
//! `VoiceManager` holds the per-key voice groups, `Renderer` is the seam to
//! whatever produces sound, and `PlayerHandle` runs the manager on its own
//! thread so every key event is applied in order.

pub mod actor;
pub mod display;
pub mod renderer;
pub mod voices;

pub use actor::{PlayerCommand, PlayerHandle};
pub use display::DisplayState;
pub use renderer::{Renderer, RendererError};
pub use voices::VoiceManager;
