use std::sync::mpsc::Receiver;

use assembly::TemplateRegistry;
use color_eyre::Report;
use config::{Config, KeyboardLayout};
use itertools::Itertools;
use three_d::{
    degrees, vec3, window, Camera, Context, Degrees, FrameInput, FrameOutput, InnerSpace,
    MouseButton, OrbitControl, Vec3, Viewport, WindowError, WindowSettings,
};
use winit::event_loop::EventLoop;

use crate::{
    assets::Assets,
    gui::Gui,
    scene::Scene,
    update::{SceneUpdate, SceneUpdater},
};

const CAMERA_OFFSET: Vec3 = vec3(0.0, 5.0, 12.0);
const DEFAULT_FOV: Degrees = degrees(22.5);
const MIN_ORBIT_DISTANCE: f32 = 0.5;
const MAX_ORBIT_DISTANCE: f32 = 100.0;

/// An application window.
pub struct Window {
    inner: window::Window,
    updater: SceneUpdater,
    receiver: Receiver<SceneUpdate>,
}

impl Window {
    /// Creates a new window.
    ///
    /// # Errors
    ///
    /// Returns a [`WindowError`] if the window could not be created.
    pub fn try_new() -> Result<Self, WindowError> {
        let event_loop = EventLoop::new();
        let event_loop_proxy = event_loop.create_proxy();
        let inner = window::Window::from_event_loop(
            WindowSettings {
                title: "Keebview".to_owned(),
                ..Default::default()
            },
            event_loop,
        )?;

        let (updater, receiver) = SceneUpdater::from_event_loop_proxy(event_loop_proxy);

        Ok(Self {
            inner,
            updater,
            receiver,
        })
    }

    /// Returns the scene updater.
    #[must_use]
    pub fn scene_updater(&self) -> SceneUpdater {
        self.updater.clone()
    }

    /// Runs the render loop. This is blocking until the window is closed.
    pub fn run_render_loop(self, settings: Config) {
        let mut application = Application::new(&self.inner, self.receiver, settings);

        self.inner.render_loop(move |frame_input| {
            application.handle_events(frame_input);
            FrameOutput::default()
        });
    }
}

/// An application rendering an interactive scene and GUI.
struct Application {
    control: OrbitControl,
    camera: Camera,
    scene: Scene,
    registry: TemplateRegistry,
    receiver: Receiver<SceneUpdate>,
    gui: Gui,
    settings: Config,
}

impl Application {
    /// Creates a new application given a window and a scene update receiver.
    fn new(window: &window::Window, receiver: Receiver<SceneUpdate>, settings: Config) -> Self {
        const DEFAULT_TARGET: Vec3 = vec3(0.0, 0.0, 0.0);

        let context = window.gl();
        let camera = Camera::new_perspective(
            window.viewport(),
            DEFAULT_TARGET + CAMERA_OFFSET,
            DEFAULT_TARGET,
            Vec3::unit_y(),
            DEFAULT_FOV,
            0.1,
            1000.0,
        );
        let control = OrbitControl::new(DEFAULT_TARGET, MIN_ORBIT_DISTANCE, MAX_ORBIT_DISTANCE);
        let scene = Scene::default();
        let registry = Assets::new().into_registry();
        let gui = Gui::new(&context);

        Self {
            control,
            camera,
            scene,
            registry,
            receiver,
            gui,
            settings,
        }
    }

    /// Handles events for the given frame input.
    fn handle_events(&mut self, mut frame_input: FrameInput) {
        if self.gui.update(&mut frame_input, &mut self.settings) {
            self.scene.update_settings(self.settings.clone());
        }

        #[allow(clippy::cast_possible_truncation)]
        let viewport = Viewport {
            x: (Gui::SIDE_PANEL_WIDTH * frame_input.device_pixel_ratio) as i32,
            y: 0,
            #[allow(clippy::cast_sign_loss)]
            width: frame_input.viewport.width
                - (Gui::SIDE_PANEL_WIDTH * frame_input.device_pixel_ratio) as u32,
            height: frame_input.viewport.height,
        };
        self.camera.set_viewport(viewport);
        self.control
            .handle_events(&mut self.camera, &mut frame_input.events);

        // Allow translating the camera sideways when holding right mouse button
        for event in &mut frame_input.events {
            if let three_d::Event::MouseMotion { button, delta, .. } = event {
                if *button == Some(MouseButton::Right) {
                    let right = self.camera.right_direction().normalize();
                    let up = right.cross(self.camera.view_direction());
                    let translation = -delta.0 * right + delta.1 * up;
                    let speed = 0.001 * self.camera.position().magnitude();

                    self.camera.translate(speed * translation);
                }
            }
        }

        if let Ok(scene_update) = self.receiver.try_recv() {
            self.handle_scene_update(&frame_input.context, scene_update);
        }

        // Render scene and GUI
        let screen = frame_input.screen();
        self.scene.render(&self.camera, &screen);
        self.gui.render(&screen);
    }

    /// Handles a scene update.
    fn handle_scene_update(&mut self, context: &Context, scene_update: SceneUpdate) {
        match scene_update {
            SceneUpdate::Layout(layout) => {
                self.scene = Scene::from_layout(
                    context,
                    &layout,
                    &self.registry,
                    self.settings.clone(),
                );
                self.look_at(keyboard_center(&layout));
            }
            SceneUpdate::Error(error) => eprintln!("Error: {:?}", Report::new(error)),
        }
    }

    /// Centers the camera and its orbit on the given point.
    fn look_at(&mut self, target: Vec3) {
        self.camera
            .set_view(target + CAMERA_OFFSET, target, Vec3::unit_y());
        self.control = OrbitControl::new(target, MIN_ORBIT_DISTANCE, MAX_ORBIT_DISTANCE);
    }
}

/// Returns the point centered between the outermost anchors of both halves.
fn keyboard_center(layout: &KeyboardLayout) -> Vec3 {
    let Some((min, max)) = layout
        .left
        .anchors
        .iter()
        .chain(&layout.right.anchors)
        .map(|anchor| f64::from(anchor.x))
        .minmax()
        .into_option()
    else {
        return vec3(0.0, 0.0, 0.0);
    };

    #[allow(clippy::cast_possible_truncation)]
    let x = ((min + max) / 2.0) as f32;

    vec3(x, 0.0, 0.0)
}
