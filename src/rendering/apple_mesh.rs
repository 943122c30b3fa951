use ggez::graphics::{DrawMode, Mesh, MeshBuilder};
use ggez::Context;
use std::f32::consts::TAU;

use crate::app::game_context::GameContext;
use crate::apple::Apple;
use crate::basic::Point;
use crate::error::{ErrorConversion, Result};

/// Food is a filled disk with a brighter off-center core as a
/// radial highlight
pub fn apple_mesh(apple: &Apple, gtx: &GameContext, ctx: &Context) -> Result<Mesh> {
    let side = gtx.cell_dim.side;
    let center = apple.pos.to_cartesian(gtx.cell_dim) + gtx.cell_dim.center();

    let mut builder = MeshBuilder::new();

    let res: Result = (|| {
        builder.circle(
            DrawMode::fill(),
            center,
            side * 0.42,
            0.1,
            gtx.palette.apple_color,
        )?;
        // highlight sits up and to the left of center and pulses
        // gently on the display clock
        let pulse = (gtx.elapsed_millis as f32 / 700. * TAU).sin() * 0.03;
        let highlight = center + Point::square(-side * 0.1);
        builder.circle(
            DrawMode::fill(),
            highlight,
            side * (0.16 + pulse),
            0.1,
            gtx.palette.apple_highlight_color,
        )?;
        Ok(())
    })();

    res.map(|_| Mesh::from_data(ctx, builder.build()))
        .with_trace_step("apple_mesh")
}
