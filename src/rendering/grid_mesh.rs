use ggez::graphics::{DrawMode, Mesh, MeshBuilder, Rect};
use ggez::Context;

use crate::app::game_context::GameContext;
use crate::basic::Point;
use crate::error::{ErrorConversion, Result};

/// Horizontal and vertical cell separators across the whole board
pub fn grid_mesh(gtx: &GameContext, ctx: &Context) -> Result<Mesh> {
    let side = gtx.cell_dim.side;
    let width = gtx.board_dim.x as f32 * side;
    let height = gtx.board_dim.y as f32 * side;

    let mut builder = MeshBuilder::new();

    let res: Result = (|| {
        for x in (0..=gtx.board_dim.x).map(|x| x as f32 * side) {
            builder.line(
                &[Point { x, y: 0. }, Point { x, y: height }],
                gtx.palette.grid_thickness,
                gtx.palette.grid_color,
            )?;
        }
        for y in (0..=gtx.board_dim.y).map(|y| y as f32 * side) {
            builder.line(
                &[Point { x: 0., y }, Point { x: width, y }],
                gtx.palette.grid_thickness,
                gtx.palette.grid_color,
            )?;
        }
        Ok(())
    })();

    res.map(|_| Mesh::from_data(ctx, builder.build()))
        .with_trace_step("grid_mesh")
}

pub fn border_mesh(gtx: &GameContext, ctx: &Context) -> Result<Mesh> {
    let side = gtx.cell_dim.side;
    let bounds = Rect::new(
        0.,
        0.,
        gtx.board_dim.x as f32 * side,
        gtx.board_dim.y as f32 * side,
    );

    let mut builder = MeshBuilder::new();
    builder
        .rectangle(
            DrawMode::stroke(gtx.palette.border_thickness),
            bounds,
            gtx.palette.border_color,
        )
        .map_err(crate::error::Error::from)
        .with_trace_step("border_mesh")?;

    Ok(Mesh::from_data(ctx, builder.build()))
}
