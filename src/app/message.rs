use ggez::graphics::{Canvas, Color, DrawParam, PxScale, Text};
use ggez::Context;
use std::time::{Duration, Instant};

use crate::basic::Point;
use crate::error::Result;

/// Finite number of possible messages
#[derive(PartialEq, Eq, Hash, Copy, Clone)]
pub enum MessageID {
    /// Persistent score readout
    Score,
    /// Persistent best-for-this-board-size readout
    Best,
    /// Persistent fps view
    Fps,
    /// Temporary info when pausing, muting, resizing the board, etc.
    Notification,
}

pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

pub struct Message {
    pub text: String,

    pub position: Position,
    pub h_margin: f32,
    pub v_margin: f32,
    pub font_size: f32,
    pub color: Color,
    // None means unlimited duration
    pub disappear: Option<Instant>,
}

impl Message {
    pub const DEFAULT_MARGIN: f32 = 12.;
    pub const DEFAULT_FONT_SIZE: f32 = 22.;

    pub fn new(text: String, position: Position, color: Color, duration: Option<Duration>) -> Self {
        Self {
            text,
            position,
            h_margin: Self::DEFAULT_MARGIN,
            v_margin: Self::DEFAULT_MARGIN,
            font_size: Self::DEFAULT_FONT_SIZE,
            color,
            disappear: duration.map(|d| Instant::now() + d),
        }
    }

    /// Draws the message; Ok(false) signifies that the message has
    /// reached its end of life and should be removed
    pub fn draw(&self, ctx: &Context, canvas: &mut Canvas) -> Result<bool> {
        let (width, height) = ctx.gfx.drawable_size();

        // fade out at the end of life
        let mut color = self.color;
        if let Some(deadline) = self.disappear {
            match deadline.checked_duration_since(Instant::now()) {
                None => return Ok(false),
                Some(time_left) => {
                    let millis = time_left.as_millis();
                    if millis < 200 {
                        color.a = millis as f32 / 200.;
                    }
                }
            }
        }

        let mut text = Text::new(self.text.as_str());
        text.set_scale(PxScale::from(self.font_size));

        let measured = text.measure(ctx)?;
        let dest = match self.position {
            Position::TopLeft => Point { x: self.h_margin, y: self.v_margin },
            Position::TopRight => Point {
                x: width - self.h_margin - measured.x,
                y: self.v_margin,
            },
            Position::BottomLeft => Point {
                x: self.h_margin,
                y: height - self.v_margin - measured.y,
            },
            Position::BottomRight => Point {
                x: width - self.h_margin - measured.x,
                y: height - self.v_margin - measured.y,
            },
        };

        canvas.draw(&text, DrawParam::default().dest(dest).color(color));
        Ok(true)
    }
}
