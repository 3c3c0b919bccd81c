// vidsqueeze-cli/src/logging.rs
//
// env_logger setup. The default filter level follows the -v count; the
// RUST_LOG environment variable overrides it:
// - (none):  warnings and errors only
// - -v:      informational logs
// - -vv:     debug logs, including the constructed ffmpeg commands

/// Initializes the global logger from the verbosity count.
pub fn init(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .format_timestamp(None)
    .init();
}
