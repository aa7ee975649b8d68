use anyhow::{Context, Result};
use podio_scan_inspect::InspectorConfig;
use tracing::Level;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let config = InspectorConfig::default();
    let stdout = std::io::stdout();
    podio_scan_inspect::run(&config, &mut stdout.lock())
        .with_context(|| format!("inspecting {}", config.db_path.display()))
}
