use clap::Parser;

pub(crate) const DEFAULT_SCRIPTS_DIR: &str = "states";
pub(crate) const DEFAULT_OUT_DIR: &str = "assets/states";

#[derive(Debug, Parser)]
#[command(name = "tf-compile")]
#[command(about = "Compile timefork dialogue scripts into binary state assets")]
pub(crate) struct Cli {
    /// Directory of `.txt` scripts, one state per file.
    #[arg(default_value = DEFAULT_SCRIPTS_DIR)]
    pub(crate) scripts_dir: String,
    /// Directory that receives one asset per state.
    #[arg(default_value = DEFAULT_OUT_DIR)]
    pub(crate) out_dir: String,
}
