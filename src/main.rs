//! Application entry point and thread bootstrapper.

mod logic;
mod models;
mod render;
mod shared;
mod storage;
mod system;
mod views;

use crate::logic::state::TrackerState;
use crate::models::catalog::BeatmapCatalog;
use crate::models::settings::AppSettings;
use crate::storage::{FileStore, MemoryStore, Persistence};
use crate::system::bus::SystemBus;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("MAIN: Booting Dan Course Tracker...");

    let settings = AppSettings::load();

    let catalog = match BeatmapCatalog::load(&settings.catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("MAIN: {}", e);
            BeatmapCatalog::default()
        }
    };

    if catalog.is_empty() {
        log::warn!("MAIN: Catalog is empty, check catalog_path in settings.toml");
    }

    let persistence = match FileStore::open(&settings.data_dir) {
        Ok(store) => Persistence::new(store),
        Err(e) => {
            log::error!("MAIN: {}; progress will not survive a restart", e);
            Persistence::new(MemoryStore::new())
        }
    };

    let bus = SystemBus::new();
    let state = TrackerState::new(catalog, persistence);
    let logic_handle = logic::start_thread(bus.clone(), state);

    let window_size = (settings.window_width, settings.window_height);
    if let Err(e) = render::app::App::run(bus, window_size, logic_handle) {
        log::error!("MAIN: Event loop failed: {}", e);
    }
}
