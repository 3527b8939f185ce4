mod controls_panel;
mod reveal_panel;

pub use controls_panel::controls_panel;
pub use reveal_panel::reveal_panel;

use crate::event::StatusLevel;

fn status_color(level: StatusLevel) -> egui::Color32 {
    match level {
        StatusLevel::Success => egui::Color32::from_rgb(0x4d, 0xe3, 0xca),
        StatusLevel::Warning => egui::Color32::from_rgb(0xff, 0xe0, 0x87),
        StatusLevel::Error => egui::Color32::from_rgb(0xff, 0x6b, 0x6b),
    }
}
