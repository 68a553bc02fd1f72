mod app;

use eframe::egui;

use habzone::config::{default_config_path, ConfigStore, Settings};

use app::HabZoneApp;

/// Install the logger. Unless `RUST_LOG` is set, records are filtered by
/// `log::max_level` alone so the verbose toggle can change it at runtime.
/// Returns whether that runtime control is active.
fn init_logging(settings: &Settings) -> bool {
    let runtime_level = std::env::var_os("RUST_LOG").is_none();
    let mut builder = env_logger::Builder::from_default_env();
    if runtime_level {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
    if runtime_level {
        log::set_max_level(settings.log_level());
    }
    runtime_level
}

fn main() {
    let store = ConfigStore::open(&default_config_path());
    let settings = Settings::read(&store);
    let runtime_level = init_logging(&settings);
    log::info!("HabZone {} starting", habzone::VERSION);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([420.0, 220.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "HabZone",
        options,
        Box::new(move |cc| {
            Ok(Box::new(HabZoneApp::new(
                &cc.egui_ctx,
                store,
                settings,
                runtime_level,
            )))
        }),
    );
    if let Err(e) = result {
        log::error!("Failed to start HabZone: {}", e);
        std::process::exit(1);
    }
}
