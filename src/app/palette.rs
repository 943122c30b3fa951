use ggez::graphics::Color;

use crate::snake::PaletteTemplate;

/// Colors of everything that isn't the snake
#[derive(Copy, Clone, Debug)]
pub struct Palette {
    pub background_color: Color,
    pub grid_color: Color,
    pub grid_thickness: f32,
    pub border_color: Color,
    pub border_thickness: f32,

    pub apple_color: Color,
    pub apple_highlight_color: Color,

    pub particle_color: Color,

    pub text_color: Color,
    pub notification_color: Color,
    pub overlay_color: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background_color: Color::from_rgb(13, 17, 28),
            grid_color: Color::from_rgb(30, 38, 58),
            grid_thickness: 1.,
            border_color: Color::from_rgb(58, 70, 98),
            border_thickness: 2.,

            apple_color: Color::from_rgb(235, 70, 70),
            apple_highlight_color: Color::from_rgb(255, 150, 130),

            particle_color: Color::from_rgb(110, 231, 183),

            text_color: Color::from_rgb(226, 232, 240),
            notification_color: Color::from_rgb(148, 163, 184),
            overlay_color: Color::new(0., 0., 0., 0.55),
        }
    }

    pub fn snake_palette(&self) -> PaletteTemplate {
        PaletteTemplate::emerald()
    }
}
