use crate::participant::ParticipantId;
use crate::RandomizerApp;

pub fn reveal_panel(app: &mut RandomizerApp, ctx: &egui::Context) {
    let display = app.display_snapshot();
    let mut returned: Option<ParticipantId> = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(32.0);

            let size = if display.emphasized { 72.0 } else { 64.0 };
            let mut name = egui::RichText::new(display.shown_name_or_placeholder())
                .size(size)
                .strong();
            if display.highlighting_winner {
                name = name.color(egui::Color32::GOLD);
            } else if display.drawing {
                name = name.color(egui::Color32::LIGHT_BLUE);
            }
            ui.label(name);

            ui.add_space(32.0);
            ui.heading("History");
        });

        ui.horizontal_wrapped(|ui| {
            // newest first
            for (index, participant) in display.history.iter().rev().enumerate() {
                let response = ui
                    .selectable_label(index == 0, participant.id().to_string())
                    .on_hover_text(format!("{} (click to return to the draw)", participant.name()));
                if response.clicked() {
                    returned = Some(participant.id());
                }
            }
        });
    });

    if let Some(id) = returned {
        let _ = app.session_mut().return_to_pool(id);
    }
}
