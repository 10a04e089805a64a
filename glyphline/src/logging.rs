use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

/// Install the global log subscriber: INFO by default, DEBUG when verbose.
///
/// A subscriber that is already installed is kept.
pub fn init(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}
