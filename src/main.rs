#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use vims_randomizer::{DrawConfig, RandomizerApp};

/// Environment variable naming a JSON file with configuration overrides
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "VIMS_RANDOMIZER_CONFIG";

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> DrawConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return DrawConfig::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|json| DrawConfig::from_json_str(&json).map_err(|err| err.to_string()));
    match loaded {
        Ok(config) => {
            log::info!("Loaded configuration from {}", path);
            config
        }
        Err(err) => {
            log::error!("Ignoring configuration file {}: {}", path, err);
            DrawConfig::default()
        }
    }
}

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 520.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Vims Randomizer",
        native_options,
        Box::new(|cc| Ok(Box::new(RandomizerApp::new(cc, config)))),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Failed to find the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(RandomizerApp::new(cc, DrawConfig::default())))),
            )
            .await;

        if let Err(e) = start_result {
            log::error!("Failed to start eframe: {e:?}");
        }
    });
}
