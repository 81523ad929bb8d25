use quadview_core::catalog::Direction;
use quadview_core::config::ViewerConfig;
use quadview_core::interaction::ViewerKey;

use crate::app::QuadviewApp;
use crate::messages::WorkerResult;

const OPEN_SHORTCUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
const QUIT_SHORTCUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

pub fn show(ctx: &egui::Context, app: &mut QuadviewApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open = egui::Button::new("Open Config...")
                    .shortcut_text(ctx.format_shortcut(&OPEN_SHORTCUT));
                if ui.add(open).clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(ctx, app);
                }

                ui.separator();

                if ui.button("Refresh Sets").clicked() {
                    ui.close();
                    app.refresh_sets();
                }

                ui.separator();

                let quit =
                    egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&QUIT_SHORTCUT));
                if ui.add(quit).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.add(egui::Button::new("Zoom In").shortcut_text("+")).clicked() {
                    ui.close();
                    app.key(ViewerKey::ZoomIn);
                }
                if ui.add(egui::Button::new("Zoom Out").shortcut_text("-")).clicked() {
                    ui.close();
                    app.key(ViewerKey::ZoomOut);
                }
                if ui.add(egui::Button::new("Reset View").shortcut_text("Double-click")).clicked() {
                    ui.close();
                    app.viewer.reset_view(std::time::Instant::now());
                }
            });

            ui.menu_button("Set", |ui| {
                if ui.add(egui::Button::new("Next").shortcut_text("\u{2192}")).clicked() {
                    ui.close();
                    app.navigate(Direction::Next);
                }
                if ui.add(egui::Button::new("Previous").shortcut_text("\u{2190}")).clicked() {
                    ui.close();
                    app.navigate(Direction::Previous);
                }
                if ui.button("Reload").clicked() {
                    ui.close();
                    app.reload_set();
                }

                let sets = app.viewer.catalog().sets().to_vec();
                if !sets.is_empty() {
                    ui.separator();
                    let current = app.viewer.catalog().index();
                    egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                        for (i, set) in sets.iter().enumerate() {
                            if ui.selectable_label(current == i as isize, set).clicked() {
                                ui.close();
                                app.select_set(i);
                            }
                        }
                    });
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&OPEN_SHORTCUT)) {
            import_config(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&QUIT_SHORTCUT)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        for key in pressed_viewer_keys(ctx) {
            app.key(key);
        }
    });
}

/// Map this frame's key presses onto viewer commands.
fn pressed_viewer_keys(ctx: &egui::Context) -> Vec<ViewerKey> {
    const BINDINGS: [(egui::Key, ViewerKey); 7] = [
        (egui::Key::Plus, ViewerKey::ZoomIn),
        (egui::Key::Equals, ViewerKey::ZoomIn),
        (egui::Key::Minus, ViewerKey::ZoomOut),
        (egui::Key::ArrowRight, ViewerKey::NextSet),
        (egui::Key::PageDown, ViewerKey::NextSet),
        (egui::Key::ArrowLeft, ViewerKey::PreviousSet),
        (egui::Key::PageUp, ViewerKey::PreviousSet),
    ];

    ctx.input(|i| {
        BINDINGS
            .iter()
            .filter(|(key, _)| i.key_pressed(*key))
            .map(|(_, action)| *action)
            .collect()
    })
}

fn import_config(ctx: &egui::Context, app: &mut QuadviewApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match ViewerConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Cannot load {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(result);
        ctx.request_repaint();
    });
}

fn export_config(ctx: &egui::Context, app: &mut QuadviewApp) {
    let content = match app.config.to_toml() {
        Ok(content) => content,
        Err(e) => {
            app.ui_state.add_log(format!("ERROR: {e}"));
            return;
        }
    };
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("quadview.toml")
            .save_file()
        {
            let message = match std::fs::write(&path, content) {
                Ok(()) => WorkerResult::Log {
                    message: format!("Config saved to {}", path.display()),
                },
                Err(e) => WorkerResult::Error {
                    message: format!("Cannot write {}: {e}", path.display()),
                },
            };
            let _ = result_tx.send(message);
            ctx.request_repaint();
        }
    });
}
