use ggez::graphics::Color;
use hsl::HSL;

use crate::snake::State;

lazy_static! {
    static ref DEFAULT_CRASHED_COLOR: Color = Color::from_rgb(255, 0, 128);
}

/// Per-segment coloring keyed by position from the head
#[derive(Copy, Clone, Debug)]
pub enum PaletteTemplate {
    Solid {
        color: Color,
        head: Color,
    },
    RGBGradient {
        head: Color,
        tail: Color,
    },
    HSLGradient {
        head_hue: f64,
        tail_hue: f64,
        head_lightness: f64,
        tail_lightness: f64,
    },
}

impl PaletteTemplate {
    /// The green ramp used by the default theme
    pub fn emerald() -> Self {
        Self::HSLGradient {
            head_hue: 150.,
            tail_hue: 163.,
            head_lightness: 0.62,
            tail_lightness: 0.32,
        }
    }

    pub fn rgb_gradient(head: Color, tail: Color) -> Self {
        Self::RGBGradient { head, tail }
    }

    pub fn segment_color(&self, seg: usize, len: usize, state: State) -> Color {
        if seg == 0 && state == State::Crashed {
            return *DEFAULT_CRASHED_COLOR;
        }

        // 0. at the head, 1. at the tail
        let tail_ratio = if len <= 1 {
            0.
        } else {
            seg as f64 / (len - 1) as f64
        };

        match *self {
            PaletteTemplate::Solid { color, head } => {
                if seg == 0 {
                    head
                } else {
                    color
                }
            }
            PaletteTemplate::RGBGradient { head, tail } => {
                let head_ratio = 1. - tail_ratio as f32;
                Color {
                    r: head_ratio * head.r + tail_ratio as f32 * tail.r,
                    g: head_ratio * head.g + tail_ratio as f32 * tail.g,
                    b: head_ratio * head.b + tail_ratio as f32 * tail.b,
                    a: 1.,
                }
            }
            PaletteTemplate::HSLGradient {
                head_hue,
                tail_hue,
                head_lightness,
                tail_lightness,
            } => {
                let hsl = HSL {
                    h: head_hue + (tail_hue - head_hue) * tail_ratio,
                    s: 1.,
                    l: head_lightness + (tail_lightness - head_lightness) * tail_ratio,
                };
                Color::from(hsl.to_rgb())
            }
        }
    }

    /// Accent used to outline the head segment
    pub fn head_outline(&self) -> Color {
        match *self {
            PaletteTemplate::Solid { head, .. } => head,
            PaletteTemplate::RGBGradient { head, .. } => head,
            PaletteTemplate::HSLGradient { head_hue, .. } => {
                let hsl = HSL { h: head_hue, s: 1., l: 0.8 };
                Color::from(hsl.to_rgb())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints() {
        let head = Color::from_rgb(72, 255, 173);
        let tail = Color::from_rgb(7, 140, 86);
        let palette = PaletteTemplate::rgb_gradient(head, tail);

        let c0 = palette.segment_color(0, 10, State::Living);
        let c9 = palette.segment_color(9, 10, State::Living);
        assert!((c0.r - head.r).abs() < 1e-6 && (c0.g - head.g).abs() < 1e-6);
        assert!((c9.r - tail.r).abs() < 1e-6 && (c9.b - tail.b).abs() < 1e-6);
    }

    #[test]
    fn crashed_head_is_marked() {
        let palette = PaletteTemplate::emerald();
        let crashed = palette.segment_color(0, 3, State::Crashed);
        let living = palette.segment_color(0, 3, State::Living);
        assert_ne!(
            (crashed.r, crashed.g, crashed.b),
            (living.r, living.g, living.b)
        );
        // only the head shows the crash
        let body = palette.segment_color(1, 3, State::Crashed);
        let body_living = palette.segment_color(1, 3, State::Living);
        assert_eq!((body.r, body.g, body.b), (body_living.r, body_living.g, body_living.b));
    }

    #[test]
    fn length_one_snake_has_a_color() {
        let palette = PaletteTemplate::emerald();
        let _ = palette.segment_color(0, 1, State::Living);
    }
}
