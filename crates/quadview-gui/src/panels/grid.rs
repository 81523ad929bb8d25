use std::time::Instant;

use quadview_core::interaction::SurfaceSize;
use quadview_core::pane::{PaneKey, PaneSlot};
use quadview_core::render::PaneDraw;

use crate::app::QuadviewApp;

const PANE_GAP: f32 = 4.0;

pub fn show(ctx: &egui::Context, app: &mut QuadviewApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::from_gray(20)))
        .show(ctx, |ui| {
            let area = ui.available_rect_before_wrap();
            let surfaces = pane_surfaces(area, app.viewer.output_aspect() as f32);

            for pane in PaneKey::ALL {
                let rect = surfaces[pane.index()];
                let response = ui.interact(
                    rect,
                    ui.id().with(pane.as_str()),
                    egui::Sense::click_and_drag(),
                );
                handle_input(ui, &response, app, rect);
                paint_pane(ui, app, pane, rect);
            }
        });
}

/// Four equal surfaces of the output aspect ratio, letterboxed in the 2x2 cells.
fn pane_surfaces(area: egui::Rect, aspect: f32) -> [egui::Rect; 4] {
    let cell = egui::vec2(
        ((area.width() - PANE_GAP) / 2.0).max(1.0),
        ((area.height() - PANE_GAP) / 2.0).max(1.0),
    );
    let size = if cell.x / cell.y > aspect {
        egui::vec2(cell.y * aspect, cell.y)
    } else {
        egui::vec2(cell.x, cell.x / aspect)
    };

    PaneKey::ALL.map(|pane| {
        let (col, row) = pane.grid_position();
        let stride = cell + egui::Vec2::splat(PANE_GAP);
        let min = area.min + egui::vec2(col as f32, row as f32) * stride;
        egui::Rect::from_center_size(egui::Rect::from_min_size(min, cell).center(), size)
    })
}

fn handle_input(ui: &egui::Ui, response: &egui::Response, app: &mut QuadviewApp, rect: egui::Rect) {
    let now = Instant::now();
    let surface = SurfaceSize::new(rect.width() as f64, rect.height() as f64);
    let local = |pos: egui::Pos2| [(pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64];

    if response.double_clicked() {
        app.viewer.reset_view(now);
        return;
    }

    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            app.viewer.pointer_down(local(pos));
        }
    }
    if response.dragged_by(egui::PointerButton::Primary) && app.viewer.is_dragging() {
        if let Some(pos) = response.interact_pointer_pos() {
            app.viewer.pointer_move(local(pos), surface, now);
        }
    }
    if response.drag_stopped() {
        app.viewer.pointer_up();
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            if let Some(pos) = response.hover_pos() {
                app.viewer.wheel(scroll as f64, local(pos), surface, now);
            }
        }
    }
}

fn paint_pane(ui: &egui::Ui, app: &QuadviewApp, pane: PaneKey, rect: egui::Rect) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(30));

    match app.viewer.frame()[pane] {
        PaneDraw::Blit { rect: source, dims } => {
            if let Some(ref texture) = app.grid.textures[pane] {
                let [u0, v0, u1, v1] = source.to_uv(dims).map(|v| v as f32);
                painter.image(
                    texture.handle.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(u0, v0), egui::pos2(u1, v1)),
                    egui::Color32::WHITE,
                );
            }
        }
        PaneDraw::Placeholder(placeholder) => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                placeholder.to_string(),
                egui::FontId::proportional(18.0),
                egui::Color32::from_gray(140),
            );
        }
    }

    draw_pane_label(&painter, rect, &pane_label(app, pane));
}

fn pane_label(app: &QuadviewApp, pane: PaneKey) -> String {
    let slot = app.viewer.pipeline().slot(pane);
    let mut label = match slot {
        PaneSlot::Loaded { image, stage } => format!("{pane}  {} ({stage})", image.dims),
        PaneSlot::Loading | PaneSlot::Failed { .. } => pane.to_string(),
    };
    if let Some(ref texture) = app.grid.textures[pane] {
        if texture.display_scale < 1.0 {
            label.push_str(&format!(", shown at {:.0}%", texture.display_scale * 100.0));
        }
    }
    label
}

fn draw_pane_label(painter: &egui::Painter, rect: egui::Rect, label: &str) {
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    painter.text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}
