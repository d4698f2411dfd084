use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never mix with command output.
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init(verbose: bool, use_colors: bool) {
    let default = if verbose {
        "warn,tdo=debug,tdo_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(use_colors)
        .init();
}
