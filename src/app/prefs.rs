use serde::{Deserialize, Serialize};

use crate::error::{ErrorConversion, Result};
use crate::storage::{KvStore, SETTINGS_KEY};

fn default_cell() -> f32 {
    20.
}

fn default_tps() -> f64 {
    10.
}

fn default_true() -> bool {
    true
}

fn default_volume() -> f32 {
    0.6
}

/// User settings, persisted as one JSON document. Unknown fields in
/// stored data are ignored and missing fields take their defaults, so
/// old documents keep loading as the schema grows.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Prefs {
    /// Cell side length in pixels
    #[serde(default = "default_cell")]
    pub cell: f32,

    /// Simulation ticks per second
    #[serde(default = "default_tps")]
    pub tps: f64,

    /// Torus boundary when true, wall-collision-is-death when false
    #[serde(default = "default_true")]
    pub wrap: bool,

    #[serde(default)]
    pub muted: bool,

    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Name written into leaderboard entries
    #[serde(default)]
    pub nickname: String,

    #[serde(skip, default = "default_true")]
    pub draw_grid: bool,

    #[serde(skip)]
    pub display_fps: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            cell: default_cell(),
            tps: default_tps(),
            wrap: true,
            muted: false,
            volume: default_volume(),
            nickname: String::new(),

            draw_grid: true,
            display_fps: false,
        }
    }
}

impl Prefs {
    pub const MIN_TPS: f64 = 2.;
    pub const MAX_TPS: f64 = 30.;

    /// Missing or corrupt settings degrade to the defaults
    pub fn load(store: &impl KvStore) -> Self {
        let mut prefs = match store.read(SETTINGS_KEY) {
            None => Self::default(),
            Some(json) => match serde_json::from_str(&json) {
                Ok(prefs) => prefs,
                Err(e) => {
                    eprintln!("warning: discarding corrupt settings: {e}");
                    Self::default()
                }
            },
        };
        prefs.tps = prefs.tps.clamp(Self::MIN_TPS, Self::MAX_TPS);
        prefs
    }

    pub fn save(&self, store: &mut impl KvStore) -> Result {
        let json = serde_json::to_string(self).map_err(crate::error::Error::from)?;
        store.write(SETTINGS_KEY, &json).with_trace_step("Prefs::save")
    }
}
