#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate lazy_static;

use ggez::conf::{WindowMode, WindowSetup};
use ggez::{event, ContextBuilder};

use crate::app::App;

mod app;
mod apple;
mod audio;
mod basic;
mod error;
mod rendering;
mod snake;
mod snake_control;
mod storage;

fn main() {
    // matches the default 10x10 board at 20px cells; the window is
    // resized to fit once the stored settings are loaded
    let wm = WindowMode::default().dimensions(224., 268.).resizable(false);
    let ws = WindowSetup::default().title("Torus Snake").vsync(true);

    let (mut ctx, event_loop) = ContextBuilder::new("torus_snake", "torus_snake")
        .window_mode(wm)
        .window_setup(ws)
        .build()
        .expect("failed to build the ggez context");

    let app = App::new(&mut ctx).expect("failed to initialize the game");
    event::run(ctx, event_loop, app)
}
