mod config;
mod context;
mod dispatch;
mod store;
mod timeline;

pub use config::{ForkTrigger, RuntimeConfig, DEFAULT_INITIAL_STATE, DEFAULT_START_YEAR};
pub use context::{RuntimeContext, TriggerEffect};
pub use dispatch::hit_triggers;
pub use store::{Edge, StateStore};
pub use timeline::Timeline;
