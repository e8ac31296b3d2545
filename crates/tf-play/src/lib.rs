//! Frame-driven play session: input, relayout, and tile submission for a
//! timeline view, independent of any windowing or graphics library.

mod config;
mod draw;
mod input;
mod session;

pub use config::{PlayConfig, SpeakerColor};
pub use draw::Frame;
pub use input::{Button, InputEvent, InputState, Key};
pub use session::{PlaySession, TileRenderer};
