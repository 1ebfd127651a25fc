use assembly::TemplateRegistry;
use config::{Color, Config, FiniteFloat, KeyboardLayout};
use three_d::{
    vec3, AmbientLight, Attenuation, Camera, ClearState, Context, Light, PointLight, RenderTarget,
    Srgba,
};

use crate::objects::{KeyboardHalf, Render};

/// A scene rendering a split keyboard.
#[derive(Default)]
pub struct Scene {
    halves: Vec<KeyboardHalf>,
    lights: Vec<PointLight>,
    ambient: AmbientLight,
    settings: Config,
}

impl Scene {
    /// Creates a scene from the given keyboard layout, resolving each half
    /// against the given template registry.
    ///
    /// A half without a registered switch prototype contributes nothing to
    /// the scene.
    pub fn from_layout(
        context: &Context,
        layout: &KeyboardLayout,
        registry: &TemplateRegistry,
        settings: Config,
    ) -> Scene {
        let halves = [&layout.left, &layout.right]
            .into_iter()
            .filter_map(|half| assembly::resolve(half, registry))
            .map(|resolved| KeyboardHalf::new(context, resolved, &settings))
            .collect();

        let ambient = AmbientLight::new(context, 0.05, Srgba::WHITE);
        let lights = settings
            .preview
            .light_positions
            .iter()
            .map(|&position| {
                PointLight::new(
                    context,
                    0.8,
                    Srgba::WHITE,
                    light_position(position),
                    Attenuation::default(),
                )
            })
            .collect();

        Scene {
            halves,
            lights,
            ambient,
            settings,
        }
    }

    /// Updates the scene using the given display settings.
    pub fn update_settings(&mut self, settings: Config) {
        for half in &mut self.halves {
            half.update_settings(&settings);
        }

        self.settings = settings;
    }

    /// Renders the scene with a given camera and render target.
    pub fn render(&self, camera: &Camera, render_target: &RenderTarget) {
        let Color { r, g, b, a } = self.settings.colors.background;

        let mut lights: Vec<_> = self
            .lights
            .iter()
            .map(|light| light as &dyn Light)
            .collect();
        lights.push(&self.ambient as &dyn Light);

        let render_target = render_target.clear(ClearState::color_and_depth(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
            1.0,
        ));

        for half in &self.halves {
            half.render(render_target, camera, &lights);
        }
    }
}

/// Converts a configured light position into a rendering vector.
#[allow(clippy::cast_possible_truncation)]
fn light_position(position: config::Vec3<FiniteFloat>) -> three_d::Vec3 {
    vec3(
        f64::from(position.x) as f32,
        f64::from(position.y) as f32,
        f64::from(position.z) as f32,
    )
}
