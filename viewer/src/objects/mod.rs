mod half;

use assembly::InstanceBatch;
use config::{Color, Config};
use three_d::{Camera, Context, Gm, InstancedMesh, Instances, Light, RenderTarget};

use crate::material::Physical;

pub use half::KeyboardHalf;

/// The surface roughness of the keycaps.
const KEYCAP_ROUGHNESS: f32 = 0.5;
/// The surface roughness of the switch housings.
const SWITCH_ROUGHNESS: f32 = 0.3;

/// A trait for rendering an object.
pub trait Render {
    /// Renders `self` to the given render target.
    fn render(&self, render_target: &RenderTarget, camera: &Camera, lights: &[&dyn Light]);

    /// Updates the display settings of `self`.
    fn update_settings(&mut self, settings: &Config);
}

/// An instanced object which can be rendered in a scene.
struct InstancedObject {
    inner: Gm<InstancedMesh, Physical>,
}

impl InstancedObject {
    /// Creates a new instanced object from an instance batch, a color and a
    /// surface roughness.
    fn from_batch(context: &Context, batch: InstanceBatch, color: Color, roughness: f32) -> Self {
        let (mesh, transformations) = batch.into_parts();

        let instanced_mesh = InstancedMesh::new(
            context,
            &Instances {
                transformations,
                ..Default::default()
            },
            &mesh,
        );
        let material = Physical::new(color, roughness);

        Self {
            inner: Gm::new(instanced_mesh, material),
        }
    }

    /// Updates the color of the instanced object.
    fn update_color(&mut self, color: Color) {
        self.inner.material.update(color);
    }
}

impl Render for InstancedObject {
    fn render(&self, render_target: &RenderTarget, camera: &Camera, lights: &[&dyn Light]) {
        render_target.render(camera, &self.inner, lights);
    }

    fn update_settings(&mut self, _settings: &Config) {}
}
