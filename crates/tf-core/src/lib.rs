pub mod arena;
pub mod asset;
pub mod error;
pub mod types;

pub use arena::{Span, StringArena};
pub use asset::{decode_state_asset, encode_state_asset, read_state_asset, write_state_asset};
pub use error::TimeforkError;
pub use types::*;
