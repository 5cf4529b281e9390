use std::io;

use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    // Verdicts own stdout. Diagnostics go to stderr, errors unless RUST_LOG
    // says otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    gateline::process(stdin.lock(), &mut stdout.lock())
}
