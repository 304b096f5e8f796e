use tracing_subscriber::EnvFilter;

/// Targets filtered by the `-v` flag.
const CRATE_TARGETS: &[&str] = &[
    "lumpr",
    "lumpr_calendar",
    "lumpr_deck",
    "lumpr_io",
    "lumpr_model",
    "lumpr_run",
];

/// Sends log output to stderr so `results` and `schedule` can write clean
/// stdout.
///
/// Without `-v` only warnings are shown; each `-v` lowers the level one step
/// down to `trace`. A set `RUST_LOG` wins over the flag.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
