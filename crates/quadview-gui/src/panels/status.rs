use crate::app::QuadviewApp;

pub fn show(ctx: &egui::Context, app: &mut QuadviewApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let viewer = &app.viewer;
            let status = viewer.status();
            if status.is_loading() {
                ui.spinner();
            }
            ui.label(status.to_string());
            ui.separator();

            let catalog = viewer.catalog();
            if catalog.is_empty() {
                ui.label("No sets");
            } else {
                ui.label(format!("{} / {}", catalog.index() + 1, catalog.len()));
            }
            ui.separator();

            let view = viewer.view_state();
            ui.label(format!("Zoom: {:.2}x", 1.0 / view.zoom));
            ui.separator();
            ui.label(format!("Center: ({:.3}, {:.3})", view.center_x, view.center_y));

            if let Some(dims) = viewer.reference_dims() {
                ui.separator();
                ui.label(format!("Reference: {dims}"));
            }
            if !app.ui_state.source_label.is_empty() {
                ui.separator();
                ui.label(format!("Source: {}", app.ui_state.source_label));
            }
        });

        ui.add_space(2.0);
    });
}
