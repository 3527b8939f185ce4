use crate::RandomizerApp;

pub fn controls_panel(app: &mut RandomizerApp, ctx: &egui::Context) {
    let display = app.display_snapshot();

    egui::SidePanel::left("controls_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Participants");

            let has_participants = app.session().has_participants();
            let drawing = display.drawing;
            let (min, max) = {
                let config = app.session().config();
                (config.min_participants, config.max_participants)
            };

            ui.horizontal(|ui| {
                ui.label(if has_participants { "Add more:" } else { "Count:" });
                ui.add(egui::DragValue::new(app.count_input_mut()).range(min..=max));
            });

            let submit_label = if has_participants { "Add more" } else { "Add participants" };
            if ui.add_enabled(!drawing, egui::Button::new(submit_label)).clicked() {
                log::info!("{} requested: {}", submit_label, app.count_input());
                app.submit_count();
            }

            ui.separator();

            egui::Grid::new("pool_counts_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.label("Total");
                    ui.strong(display.total.to_string());
                    ui.end_row();
                    ui.label("Remaining");
                    ui.strong(display.remaining.to_string());
                    ui.end_row();
                    ui.label("Undo depth");
                    ui.strong(app.session().undo_depth().to_string());
                    ui.end_row();
                });

            ui.separator();

            let can_start = display.remaining > 0 && !drawing;
            let can_undo = app.session().can_undo();

            if ui.add_enabled(can_start, egui::Button::new("Go!")).clicked() {
                let _ = app.session_mut().start_draw();
            }
            ui.horizontal(|ui| {
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    let _ = app.session_mut().undo_last();
                }
                if ui.button("Reset all").clicked() {
                    app.session_mut().reset_all();
                }
            });

            if let Some((level, message)) = &display.status {
                ui.separator();
                ui.colored_label(super::status_color(*level), message);
            }
        });
}
