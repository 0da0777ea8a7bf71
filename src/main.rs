use anyhow::Result;
use fluffy_config::AppConfig;
use fluffy_vdisplay::{DisplayHandle, SimulatedHost, VirtualDisplayRegistry};
use tracing::{error, info, warn};

/// Create every configured display. Entries that fail are logged and skipped.
fn create_configured_displays(
    registry: &VirtualDisplayRegistry<SimulatedHost>,
    config: &AppConfig,
) -> Vec<DisplayHandle> {
    config
        .displays
        .iter()
        .filter_map(|spec| {
            let result = registry.create_virtual_display(
                spec.width,
                spec.height,
                spec.ppi,
                spec.hi_dpi,
                &spec.name,
                spec.rotation,
            );
            match result {
                Ok(handle) => Some(handle),
                Err(e) => {
                    warn!(name = %spec.name, %e, "Skipping virtual display");
                    None
                }
            }
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fluffy_display=info,fluffy_vdisplay=info,fluffy_config=info".into()
            }),
        )
        .init();

    info!("Fluffy virtual display host starting");

    // Load config.
    let config = fluffy_config::load_config().unwrap_or_else(|e| {
        warn!(?e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    info!(
        max_displays = config.host.max_displays,
        displays = config.displays.len(),
        "Config loaded"
    );

    let registry = VirtualDisplayRegistry::new(SimulatedHost::new(config.host.max_displays));
    let displays = create_configured_displays(&registry, &config);

    for d in &displays {
        let res = d.effective_resolution();
        let (w_mm, h_mm) = d.physical_size_mm();
        info!(
            id = %d.id(),
            name = d.config().name(),
            physical = %res.physical,
            logical = %res.logical,
            oriented = %d.oriented_bounds(),
            size_mm = %format!("{w_mm:.0}x{h_mm:.0}"),
            "Display ready"
        );
    }

    if displays.is_empty() {
        warn!("No virtual displays were created");
        return Ok(());
    }

    info!(active = registry.active_count(), "Press Ctrl-C to remove virtual displays and exit");
    tokio::signal::ctrl_c().await?;

    match registry.destroy_all() {
        Ok(count) => info!(count, "Virtual displays removed"),
        Err(e) => error!(%e, "Failed to remove all virtual displays"),
    }

    Ok(())
}
