//! Kitforge - kit conversion front end
//!
//! Loads a scene document, converts every object in it into a kit prefab,
//! and writes the results (plus screenshots, when a preview source exists)
//! under the configured output directory.

use kitforge_convert::{KitConverter, LogProgress, NullPreviewSource};
use kitforge_scene::{AssetLibrary, SceneDocument};

use kitforge::config::KitConfig;

fn main() {
    // Load configuration
    let config = KitConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        KitConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    // Load the scene document listing the objects to convert
    let scene = match SceneDocument::load(&config.scene.path) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to load scene '{}': {}", config.scene.path, e);
            std::process::exit(1);
        }
    };

    let mut assets = AssetLibrary::new();
    let selection = scene.instantiate(&mut assets);
    log::info!(
        "Converting {} object(s) from scene '{}'",
        selection.len(),
        scene.name
    );

    // No host renderer in the CLI; previews time out and kits are written
    // without thumbnails.
    let converter = KitConverter::new(&config.output.root_dir, config.policy.to_policy());
    let report = match converter.run_batch(
        selection,
        &mut assets,
        &mut NullPreviewSource,
        &mut LogProgress,
    ) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    for item in &report.items {
        match (&item.kit_path, &item.screenshot) {
            (Some(kit), Some(shot)) => {
                log::info!("{} -> {} (+ {})", item.name, kit.display(), shot.display())
            }
            (Some(kit), None) => log::info!("{} -> {}", item.name, kit.display()),
            (None, _) => log::warn!("{} was not saved", item.name),
        }
    }

    if report.cancelled {
        log::warn!("Batch was cancelled before completing");
    }
    match report.warning_count() {
        0 => log::info!("Finished {} item(s) without warnings", report.items.len()),
        n => log::warn!("Finished {} item(s) with {} warning(s)", report.items.len(), n),
    }
}
