use anyhow::Result;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Log to stderr so table output on stdout stays clean. `RUST_LOG` wins over `debug`.
pub fn init(debug: bool) -> Result<()> {
    let level = if debug { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(EnvFilter::builder().with_default_directive(level.into()).from_env()?)
        .with_writer(std::io::stderr)
        .with_ansi(debug)
        .with_file(debug)
        .with_line_number(debug)
        .with_target(debug)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
