use std::collections::HashMap;
use std::time::Duration;

use ggez::event::{EventHandler, MouseButton};
use ggez::graphics::{Canvas, DrawMode, DrawParam, Mesh, PxScale, Rect, Text};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::fps_control::{Control, State};
use crate::app::game_context::GameContext;
use crate::app::game_state::{GameState, StepEvent};
use crate::app::message::{Message, MessageID, Position};
use crate::app::palette::Palette;
use crate::app::prefs::Prefs;
use crate::audio::Sounds;
use crate::basic::{GridPoint, Point};
use crate::error::{Error, ErrorConversion, Result};
use crate::rendering::{self, Burst};
use crate::snake_control::{Keyboard, Swipe};
use crate::storage::{DirStore, Entry, KvStore, Leaderboard, LEADERBOARD_KEY};

pub mod fps_control;
pub mod game_context;
pub mod game_state;
pub mod message;
pub mod palette;
pub mod prefs;

/// Selectable square board sizes, bound to the number keys
const BOARD_SIZES: [isize; 6] = [5, 8, 10, 12, 15, 20];
const DEFAULT_BOARD_SIZE: isize = 10;

/// Space above the board reserved for the score readouts
const HUD_HEIGHT: f32 = 44.;
const MARGIN: f32 = 12.;

const TPS_STEP: f64 = 2.;

const NOTIFICATION_DURATION: Duration = Duration::from_secs(2);

pub struct App {
    control: Control,
    gtx: GameContext,
    state: GameState,

    input: Keyboard,
    swipe: Swipe,
    sounds: Sounds,

    store: DirStore,
    leaderboard: Leaderboard,
    /// Whether the current game-over score has been recorded
    saved: bool,

    messages: HashMap<MessageID, Message>,
    bursts: Vec<Burst>,
    show_leaderboard: bool,

    /// Cached for as long as the board geometry doesn't change
    grid_mesh: Option<Mesh>,
    border_mesh: Option<Mesh>,
}

impl App {
    pub fn new(ctx: &mut Context) -> Result<Self> {
        let store = DirStore::new(ctx.fs.user_data_dir().to_path_buf());
        let prefs = Prefs::load(&store);
        let leaderboard = Leaderboard::load(&store);
        let sounds = Sounds::new(ctx, prefs.muted, prefs.volume);

        let board_dim = GridPoint::new(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE);
        let palette = Palette::dark();
        let gtx = GameContext {
            board_dim,
            cell_dim: prefs.cell.into(),
            palette,
            prefs,
            elapsed_millis: 0,
        };

        let mut app = Self {
            control: Control::new(gtx.prefs.tps),
            state: GameState::new(
                board_dim,
                gtx.prefs.wrap,
                palette.snake_palette(),
                StdRng::from_entropy(),
            ),
            gtx,

            input: Keyboard::new(),
            swipe: Swipe::new(),
            sounds,

            store,
            leaderboard,
            saved: false,

            messages: HashMap::new(),
            bursts: vec![],
            show_leaderboard: false,

            grid_mesh: None,
            border_mesh: None,
        };
        app.apply_window_size(ctx)?;
        app.update_score_messages();
        Ok(app)
    }

    fn board_offset(&self) -> Point {
        Point { x: MARGIN, y: MARGIN + HUD_HEIGHT }
    }

    fn apply_window_size(&mut self, ctx: &mut Context) -> Result {
        let side = self.gtx.cell_dim.side;
        let width = self.gtx.board_dim.x as f32 * side + 2. * MARGIN;
        let height = self.gtx.board_dim.y as f32 * side + HUD_HEIGHT + 2. * MARGIN;

        ctx.gfx
            .set_drawable_size(width, height)
            .map_err(Error::from)
            .with_trace_step("App::apply_window_size")?;

        self.grid_mesh = None;
        self.border_mesh = None;
        Ok(())
    }

    fn restart(&mut self) {
        self.state = GameState::new(
            self.gtx.board_dim,
            self.gtx.prefs.wrap,
            self.gtx.palette.snake_palette(),
            StdRng::from_entropy(),
        );
        // a fresh clock also discards any pending catch-up ticks
        self.control = Control::new(self.gtx.prefs.tps);
        self.input.clear();
        self.bursts.clear();
        self.saved = false;
        self.update_score_messages();
    }

    fn set_board_size(&mut self, ctx: &mut Context, size: isize) -> Result {
        let board_dim = GridPoint::new(size, size);
        if board_dim == self.gtx.board_dim {
            return Ok(());
        }

        self.gtx.board_dim = board_dim;
        self.restart();
        self.apply_window_size(ctx)?;
        self.display_notification(format!("Board {}", board_dim.size_key()));
        Ok(())
    }

    fn change_tps(&mut self, delta: f64) {
        let tps = (self.gtx.prefs.tps + delta).clamp(Prefs::MIN_TPS, Prefs::MAX_TPS);
        self.gtx.prefs.tps = tps;
        self.control.set_tps(tps);
        self.persist_settings();
        self.display_notification(format!("Speed {tps} t/s"));
    }

    fn toggle_mute(&mut self) {
        self.gtx.prefs.muted = !self.gtx.prefs.muted;
        self.sounds.muted = self.gtx.prefs.muted;
        self.persist_settings();
        self.display_notification(if self.gtx.prefs.muted { "Muted" } else { "Sound on" });
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.gtx.prefs.save(&mut self.store) {
            eprintln!("warning: failed to save settings: {e}");
        }
    }

    fn reset_leaderboard(&mut self) {
        self.leaderboard.reset();
        if let Err(e) = self.store.remove(LEADERBOARD_KEY) {
            eprintln!("warning: failed to clear the stored leaderboard: {e}");
        }
        self.update_score_messages();
        self.display_notification("Leaderboard cleared");
    }

    fn save_score(&mut self) {
        if self.control.state() != State::GameOver || self.saved {
            return;
        }

        let nickname = &self.gtx.prefs.nickname;
        let name = if nickname.is_empty() { "anonymous" } else { nickname.as_str() };
        self.leaderboard
            .record(Entry::new(name, self.state.score, self.state.size_key()));
        if let Err(e) = self.leaderboard.persist(&mut self.store) {
            eprintln!("warning: failed to save leaderboard: {e}");
        }
        self.saved = true;
        self.update_score_messages();
        self.display_notification("Score saved");
    }

    fn update_score_messages(&mut self) {
        let size_key = self.state.size_key();
        let best = self.leaderboard.best(&size_key).unwrap_or(0);

        self.messages.insert(
            MessageID::Score,
            Message::new(
                format!("Score {}", self.state.score),
                Position::TopLeft,
                self.gtx.palette.text_color,
                None,
            ),
        );
        self.messages.insert(
            MessageID::Best,
            Message::new(
                format!("Best ({size_key}) {best}"),
                Position::TopRight,
                self.gtx.palette.text_color,
                None,
            ),
        );
    }

    fn display_notification<S: Into<String>>(&mut self, text: S) {
        self.messages.insert(
            MessageID::Notification,
            Message::new(
                text.into(),
                Position::BottomRight,
                self.gtx.palette.notification_color,
                Some(NOTIFICATION_DURATION),
            ),
        );
    }

    fn head_pixel(&self) -> Point {
        self.state.snake.head().to_cartesian(self.gtx.cell_dim) + self.gtx.cell_dim.center()
    }

    /// Starts the clock on the first direction input
    fn push_direction(&mut self, dir: crate::basic::Dir) {
        self.input.push(dir);
        if self.control.state() == State::Idle {
            self.control.play();
        }
    }

    fn draw_messages(&mut self, ctx: &Context, canvas: &mut Canvas) -> Result {
        let mut expired = vec![];
        for (id, message) in &self.messages {
            if !message.draw(ctx, canvas)? {
                expired.push(*id);
            }
        }
        for id in expired {
            self.messages.remove(&id);
        }
        Ok(())
    }

    fn draw_center_lines(&self, ctx: &Context, canvas: &mut Canvas, lines: &[String]) -> Result {
        let (width, height) = ctx.gfx.drawable_size();

        let dim = Mesh::new_rectangle(
            ctx,
            DrawMode::fill(),
            Rect::new(0., 0., width, height),
            self.gtx.palette.overlay_color,
        )
        .map_err(Error::from)
        .with_trace_step("draw_center_lines")?;
        canvas.draw(&dim, DrawParam::default());

        const LINE_GAP: f32 = 10.;
        let mut texts = Vec::with_capacity(lines.len());
        let mut total_height = 0.;
        for (i, line) in lines.iter().enumerate() {
            let mut text = Text::new(line.as_str());
            // first line is the headline
            let size = if i == 0 { 34. } else { Message::DEFAULT_FONT_SIZE };
            text.set_scale(PxScale::from(size));
            let measured = text.measure(ctx)?;
            total_height += measured.y + LINE_GAP;
            texts.push((text, measured));
        }

        let mut y = (height - total_height) / 2.;
        for (text, measured) in &texts {
            let dest = Point { x: (width - measured.x) / 2., y };
            canvas.draw(text, DrawParam::default().dest(dest).color(self.gtx.palette.text_color));
            y += measured.y + LINE_GAP;
        }
        Ok(())
    }

    fn draw_game_over_overlay(&self, ctx: &Context, canvas: &mut Canvas) -> Result {
        let headline = if self.state.apple.is_none() {
            "Board cleared!"
        } else {
            "Game over"
        };

        let mut lines = vec![
            headline.to_owned(),
            format!("Score {} on {}", self.state.score, self.state.size_key()),
        ];
        if self.saved {
            lines.push("Score saved".to_owned());
        } else {
            lines.push("Return saves your score".to_owned());
        }
        lines.push("Space restarts".to_owned());

        self.draw_center_lines(ctx, canvas, &lines)
    }

    fn draw_leaderboard_overlay(&self, ctx: &Context, canvas: &mut Canvas) -> Result {
        let size_key = self.state.size_key();

        let mut lines = vec![format!("Leaderboard ({size_key})")];
        let top = self.leaderboard.top_n(&size_key, crate::storage::leaderboard::DISPLAY_CAP);
        if top.is_empty() {
            lines.push("No scores yet".to_owned());
        }
        for (i, entry) in top.iter().enumerate() {
            lines.push(format!("{:>2}. {:<16} {:>6}", i + 1, entry.name, entry.score));
        }

        self.draw_center_lines(ctx, canvas, &lines)
    }
}

impl EventHandler<Error> for App {
    fn update(&mut self, ctx: &mut Context) -> Result {
        while self.control.can_update() {
            let requested = self.input.next_dir();
            match self.state.step(requested) {
                StepEvent::Moved => self.sounds.step(ctx),
                StepEvent::Ate => {
                    self.sounds.eat(ctx);
                    self.update_score_messages();
                }
                StepEvent::Died => {
                    self.sounds.death(ctx);
                    let origin = self.head_pixel();
                    let mut rng = StdRng::from_entropy();
                    self.bursts
                        .push(Burst::new(origin, self.gtx.palette.particle_color, &mut rng));
                    self.control.game_over();
                }
                StepEvent::Cleared => {
                    self.sounds.eat(ctx);
                    self.update_score_messages();
                    self.control.game_over();
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> Result {
        self.control.graphics_frame(&mut self.gtx);

        // purely visual, runs on the display rate even when the
        // simulation is stopped
        for burst in &mut self.bursts {
            burst.advance();
        }
        self.bursts.retain(|burst| !burst.finished());

        if self.gtx.prefs.display_fps {
            self.messages.insert(
                MessageID::Fps,
                Message::new(
                    format!(
                        "{:.0} fps / {:.1} tps",
                        self.control.measured_fps(),
                        self.control.measured_tps(),
                    ),
                    Position::BottomLeft,
                    self.gtx.palette.notification_color,
                    None,
                ),
            );
        }

        let mut canvas = Canvas::from_frame(ctx, self.gtx.palette.background_color);
        let draw_param = DrawParam::default().dest(self.board_offset());

        if self.gtx.prefs.draw_grid {
            if self.grid_mesh.is_none() {
                self.grid_mesh = Some(rendering::grid_mesh(&self.gtx, ctx)?);
            }
            canvas.draw(self.grid_mesh.as_ref().unwrap(), draw_param);
        }
        if self.border_mesh.is_none() {
            self.border_mesh = Some(rendering::border_mesh(&self.gtx, ctx)?);
        }
        canvas.draw(self.border_mesh.as_ref().unwrap(), draw_param);

        if let Some(apple) = &self.state.apple {
            canvas.draw(&rendering::apple_mesh(apple, &self.gtx, ctx)?, draw_param);
        }
        canvas.draw(&rendering::snake_mesh(&self.state.snake, &self.gtx, ctx)?, draw_param);

        for burst in &self.bursts {
            canvas.draw(&burst.mesh(ctx)?, draw_param);
        }

        self.draw_messages(ctx, &mut canvas)?;

        match self.control.state() {
            State::Idle => {
                self.draw_center_lines(
                    ctx,
                    &mut canvas,
                    &["Snake".to_owned(), "Arrows, WASD or swipe to start".to_owned()],
                )?;
            }
            State::Paused => {
                self.draw_center_lines(
                    ctx,
                    &mut canvas,
                    &["Paused".to_owned(), "Space resumes".to_owned()],
                )?;
            }
            State::GameOver => self.draw_game_over_overlay(ctx, &mut canvas)?,
            State::Playing => {}
        }

        if self.show_leaderboard {
            self.draw_leaderboard_overlay(ctx, &mut canvas)?;
        }

        canvas.finish(ctx).map_err(Error::from).with_trace_step("App::draw")
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, repeated: bool) -> Result {
        use KeyCode::*;

        if repeated {
            return Ok(());
        }
        let key = match input.keycode {
            Some(key) => key,
            None => return Ok(()),
        };

        if let Some(dir) = Keyboard::candidate(key) {
            self.push_direction(dir);
            return Ok(());
        }

        match key {
            Space => match self.control.state() {
                State::GameOver => self.restart(),
                State::Playing => self.control.pause(),
                State::Paused | State::Idle => self.control.play(),
            },
            Return => self.save_score(),
            R => {
                self.restart();
                self.display_notification("Restarted");
            }
            M => self.toggle_mute(),
            G => {
                self.gtx.prefs.draw_grid = !self.gtx.prefs.draw_grid;
                let text = if self.gtx.prefs.draw_grid { "Grid on" } else { "Grid off" };
                self.display_notification(text);
            }
            F => {
                self.gtx.prefs.display_fps = !self.gtx.prefs.display_fps;
                if !self.gtx.prefs.display_fps {
                    self.messages.remove(&MessageID::Fps);
                }
            }
            L => self.show_leaderboard = !self.show_leaderboard,
            // only active while the leaderboard overlay is open
            Back => {
                if self.show_leaderboard {
                    self.reset_leaderboard();
                }
            }
            Minus => self.change_tps(-TPS_STEP),
            Equals => self.change_tps(TPS_STEP),
            Key1 | Key2 | Key3 | Key4 | Key5 | Key6 => {
                let idx = match key {
                    Key1 => 0,
                    Key2 => 1,
                    Key3 => 2,
                    Key4 => 3,
                    Key5 => 4,
                    _ => 5,
                };
                self.set_board_size(ctx, BOARD_SIZES[idx])?;
            }
            Escape => ctx.request_quit(),
            _ => {}
        }
        Ok(())
    }

    fn mouse_button_down_event(
        &mut self,
        _ctx: &mut Context,
        button: MouseButton,
        x: f32,
        y: f32,
    ) -> Result {
        if button == MouseButton::Left {
            self.swipe.begin(x, y);
        }
        Ok(())
    }

    fn mouse_button_up_event(
        &mut self,
        _ctx: &mut Context,
        button: MouseButton,
        x: f32,
        y: f32,
    ) -> Result {
        if button == MouseButton::Left {
            if let Some(dir) = self.swipe.end(x, y) {
                self.push_direction(dir);
            }
        }
        Ok(())
    }

    fn resize_event(&mut self, _ctx: &mut Context, _width: f32, _height: f32) -> Result {
        self.grid_mesh = None;
        self.border_mesh = None;
        Ok(())
    }

    fn quit_event(&mut self, _ctx: &mut Context) -> std::result::Result<bool, Error> {
        self.persist_settings();
        Ok(false)
    }
}
