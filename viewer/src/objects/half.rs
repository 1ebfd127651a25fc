use assembly::{ResolvedHalf, RowBinding};
use config::Config;
use three_d::{Camera, Context, Light, RenderTarget};

use crate::objects::{InstancedObject, Render, KEYCAP_ROUGHNESS, SWITCH_ROUGHNESS};

/// The rendered keys of one keyboard half: the switch instances plus one
/// instanced keycap object per bound row.
pub struct KeyboardHalf {
    switches: InstancedObject,
    keycaps: Vec<InstancedObject>,
    show: bool,
}

impl KeyboardHalf {
    /// Creates the objects of one keyboard half from its resolved instance
    /// batches. Skipped rows contribute no object.
    pub fn new(context: &Context, resolved: ResolvedHalf, settings: &Config) -> Self {
        let colors = &settings.colors;

        let switches =
            InstancedObject::from_batch(context, resolved.switches, colors.switch, SWITCH_ROUGHNESS);
        let keycaps = resolved
            .rows
            .into_iter()
            .filter_map(|binding| match binding {
                RowBinding::Bound(batch) => Some(InstancedObject::from_batch(
                    context,
                    batch,
                    colors.keycap,
                    KEYCAP_ROUGHNESS,
                )),
                RowBinding::Skipped { .. } => None,
            })
            .collect();

        Self {
            switches,
            keycaps,
            show: settings.preview.show_keys,
        }
    }
}

impl Render for KeyboardHalf {
    fn render(&self, render_target: &RenderTarget, camera: &Camera, lights: &[&dyn Light]) {
        if self.show {
            self.switches.render(render_target, camera, lights);
            for keycaps in &self.keycaps {
                keycaps.render(render_target, camera, lights);
            }
        }
    }

    fn update_settings(&mut self, settings: &Config) {
        self.switches.update_color(settings.colors.switch);
        for keycaps in &mut self.keycaps {
            keycaps.update_color(settings.colors.keycap);
        }

        self.show = settings.preview.show_keys;
    }
}
