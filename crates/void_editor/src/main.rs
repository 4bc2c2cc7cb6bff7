//! Void Engine Editor
//!
//! Headless entry point: imports the files named on the command line into
//! a fresh project and reports how they were classified.

use void_asset::{AssetCategory, PickedFile};
use void_editor::{EditorConfig, EditorSession, NAME, VERSION};

fn load_config() -> EditorConfig {
    let Some(path) = EditorConfig::default_path() else {
        return EditorConfig::default();
    };
    match EditorConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not up yet
            eprintln!("Ignoring configuration: {}", e);
            EditorConfig::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();

    log::info!("{} {}", NAME, VERSION);

    let files: Vec<PickedFile> = std::env::args().skip(1).map(PickedFile::from_path).collect();
    if files.is_empty() {
        log::warn!("No files given; usage: void_editor <file>...");
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let mut session = EditorSession::headless(config);
    let result = runtime.block_on(session.upload(&files));

    let assets = &session.state().assets;
    for &category in AssetCategory::all() {
        let names = assets.names(category);
        if !names.is_empty() {
            log::info!("{}: {}", category, names.join(", "));
        }
    }

    result?;
    Ok(())
}
