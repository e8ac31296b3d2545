fn main() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    std::process::exit(tf_cli::run_cli_from_args(std::env::args_os()));
}
