use std::ffi::OsString;
use std::path::Path;

use clap::Parser;
use tf_compiler::compile_scripts_dir;
use tf_core::TimeforkError;

mod cli_args;
mod error_map;

pub(crate) use cli_args::Cli;
pub(crate) use error_map::emit_error;

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, TimeforkError> {
    let compiled = compile_scripts_dir(Path::new(&cli.scripts_dir), Path::new(&cli.out_dir))?;
    println!("RESULT:OK");
    for asset in &compiled {
        println!("COMPILED:{}", asset.state_name);
    }
    Ok(0)
}

#[cfg(test)]
mod lib_tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!("timefork-cli-{}-{}", name, nanos))
    }

    fn run_with(scripts: &Path, out: &Path) -> i32 {
        run_cli_from_args([
            OsString::from("tf-compile"),
            scripts.as_os_str().to_os_string(),
            out.as_os_str().to_os_string(),
        ])
    }

    #[test]
    fn compiles_every_script_to_an_asset() {
        let root = temp_path("ok");
        let scripts = root.join("states");
        let out = root.join("assets").join("states");
        fs::create_dir_all(&scripts).expect("mkdir");
        fs::write(
            scripts.join("start.txt"),
            "*Angela: Hello.\n-\n[Next] -> ask_age_kairos\n",
        )
        .expect("write");
        fs::write(scripts.join("ask_age_kairos.txt"), "*Angela: How old?\n").expect("write");

        assert_eq!(run_with(&scripts, &out), 0);
        assert!(out.join("start").is_file());
        assert!(out.join("ask_age_kairos").is_file());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn malformed_transition_exits_with_error() {
        let root = temp_path("bad");
        let scripts = root.join("states");
        let out = root.join("out");
        fs::create_dir_all(&scripts).expect("mkdir");
        fs::write(scripts.join("start.txt"), "Hello.\n-\nNext -> start\n").expect("write");

        assert_eq!(run_with(&scripts, &out), 1);
        assert!(!out.join("start").exists());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_scripts_dir_exits_with_error() {
        let root = temp_path("missing");
        assert_eq!(run_with(&root.join("states"), &root.join("out")), 1);
    }

    #[test]
    fn argument_errors_use_clap_exit_code() {
        assert_eq!(run_cli_from_args(["tf-compile", "a", "b", "c"]), 2);
    }
}
