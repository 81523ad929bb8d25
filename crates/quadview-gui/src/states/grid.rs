use quadview_core::pane::{PaneKey, PaneMap, PaneSlot};

use crate::convert::rgba_to_color_image;

/// GPU textures for the four panes.
#[derive(Default)]
pub struct GridState {
    pub textures: PaneMap<Option<PaneTexture>>,
}

pub struct PaneTexture {
    pub handle: egui::TextureHandle,
    /// Scale factor applied for display (1.0 if no downscaling).
    pub display_scale: f32,
}

impl GridState {
    pub fn clear(&mut self) {
        self.textures = PaneMap::default();
    }

    /// Re-upload one pane after its slot changed.
    pub fn update_texture(&mut self, ctx: &egui::Context, pane: PaneKey, slot: &PaneSlot) {
        self.textures[pane] = match slot {
            PaneSlot::Loaded { image, .. } => {
                let max_side = ctx.input(|i| i.max_texture_side);
                let (color_image, display_scale) = rgba_to_color_image(&image.pixels, max_side);
                let handle = ctx.load_texture(
                    format!("pane-{}", pane.as_str()),
                    color_image,
                    egui::TextureOptions::NEAREST,
                );
                Some(PaneTexture {
                    handle,
                    display_scale,
                })
            }
            PaneSlot::Loading | PaneSlot::Failed { .. } => None,
        };
    }
}
