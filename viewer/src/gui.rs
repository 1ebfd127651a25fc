use config::{Color, Config};
use three_d::{
    egui::{Checkbox, RichText, SidePanel, Ui},
    Context, FrameInput, RenderTarget, GUI,
};

/// A graphical user interface for changing the display settings.
pub struct Gui {
    inner: GUI,
}

impl Gui {
    /// The width of the settings side panel in logical pixels.
    pub const SIDE_PANEL_WIDTH: f32 = 220.0;

    /// Creates a new GUI for the given context.
    pub fn new(context: &Context) -> Self {
        let inner = GUI::new(context);

        Self { inner }
    }

    /// Updates the GUI using the given frame input, showing widgets for the
    /// given display settings. Returns whether the settings were changed.
    pub fn update(&mut self, frame_input: &mut FrameInput, settings: &mut Config) -> bool {
        let mut changed = false;

        self.inner.update(
            &mut frame_input.events,
            frame_input.accumulated_time,
            frame_input.viewport,
            frame_input.device_pixel_ratio,
            |context| {
                SidePanel::left("settings")
                    .exact_width(Self::SIDE_PANEL_WIDTH)
                    .resizable(false)
                    .show(context, |ui| {
                        ui.add_space(8.0);
                        ui.label(RichText::new("Display").strong().size(16.0));
                        ui.add_space(8.0);
                        changed |= ui
                            .add(Checkbox::new(&mut settings.preview.show_keys, "Show keys"))
                            .changed();
                        ui.separator();
                        changed |= color_widget(ui, "Keycaps", &mut settings.colors.keycap);
                        changed |= color_widget(ui, "Switches", &mut settings.colors.switch);
                        changed |= color_widget(ui, "Background", &mut settings.colors.background);
                    });
            },
        );

        changed
    }

    /// Renders the GUI to the given render target.
    pub fn render(&self, render_target: &RenderTarget) {
        render_target
            .write(|| self.inner.render())
            .expect("rendering the gui should never fail");
    }
}

/// Shows a labeled color edit widget. Returns whether the color was changed.
fn color_widget(ui: &mut Ui, label: &str, color: &mut Color) -> bool {
    let Color { r, g, b, a } = *color;
    let mut rgb = [r, g, b];

    let changed = ui
        .horizontal(|ui| {
            ui.label(label);
            ui.color_edit_button_srgb(&mut rgb).changed()
        })
        .inner;

    let [r, g, b] = rgb;
    *color = Color { r, g, b, a };

    changed
}
