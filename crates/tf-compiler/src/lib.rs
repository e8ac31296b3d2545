//! Offline compiler from dialogue scripts to binary state assets.
//!
//! A script is a body of dialogue lines, a separator line starting with `-`,
//! and a footer of transitions:
//!
//! ```text
//! *Angela: Hello.
//! The lamp flickers.
//! -
//! [Next] met_angela ~asked -> ask_age_kairos
//! ```

mod pipeline;
mod script_parse;

pub use pipeline::{
    compile_scripts_dir, compile_sources, read_script_sources, state_name_from_path,
    write_state_assets, CompiledAsset, ScriptSource, SCRIPT_EXTENSION,
};
pub use script_parse::compile_state;
