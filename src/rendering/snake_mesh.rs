use ggez::graphics::{DrawMode, Mesh, MeshBuilder, Rect};
use ggez::Context;

use crate::app::game_context::GameContext;
use crate::error::{ErrorConversion, Result};
use crate::snake::Snake;

/// One rounded cell per segment, colored by the snake's palette
/// keyed on distance from the head; the head additionally gets an
/// outline ring
pub fn snake_mesh(snake: &Snake, gtx: &GameContext, ctx: &Context) -> Result<Mesh> {
    let side = gtx.cell_dim.side;
    // small gap between segments so the body reads as cells
    let inset = (side * 0.06).max(1.);
    let corner_radius = side * 0.15;

    let len = snake.body.len();
    let mut builder = MeshBuilder::new();

    let res: Result = (|| {
        // tail drawn first so the head ends up on top of any overlap
        for (seg, cell) in snake.body.cells.iter().enumerate().rev() {
            let pos = cell.to_cartesian(gtx.cell_dim);
            let bounds = Rect::new(
                pos.x + inset,
                pos.y + inset,
                side - 2. * inset,
                side - 2. * inset,
            );

            let color = snake.palette.segment_color(seg, len, snake.state);
            builder.rounded_rectangle(DrawMode::fill(), bounds, corner_radius, color)?;

            if seg == 0 {
                builder.rounded_rectangle(
                    DrawMode::stroke(2.),
                    bounds,
                    corner_radius,
                    snake.palette.head_outline(),
                )?;
            }
        }
        Ok(())
    })();

    res.map(|_| Mesh::from_data(ctx, builder.build()))
        .with_trace_step("snake_mesh")
}
