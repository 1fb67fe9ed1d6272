//! Crowd configuration resource.
//!
//! Settings loaded from an INI file, with safe defaults for every value so
//! the scene can start without a config file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [sheet]
//! path = ./assets/people.png
//! rows = 15
//! cols = 7
//!
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! pixel_ratio = 1.0
//!
//! [crowd]
//! seed = 42
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::fmt;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_SHEET_PATH: &str = "./assets/people.png";
const DEFAULT_ROWS: u32 = 15;
const DEFAULT_COLS: u32 = 7;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_PIXEL_RATIO: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./crowd.ini";

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The INI file could not be read or parsed.
    Load(String),
    /// The sheet grid has no cells.
    EmptyGrid { rows: u32, cols: u32 },
    /// The sheet grid has more cells than can be counted.
    GridTooLarge { rows: u32, cols: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Failed to load config file: {}", e),
            ConfigError::EmptyGrid { rows, cols } => {
                write!(f, "Sprite sheet grid {}x{} has no cells", rows, cols)
            }
            ConfigError::GridTooLarge { rows, cols } => {
                write!(f, "Sprite sheet grid {}x{} is too large", rows, cols)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Crowd configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct CrowdConfig {
    /// Location of the sprite sheet image.
    pub sheet_path: PathBuf,
    /// Cells along the image width.
    pub rows: u32,
    /// Cells along the image height.
    pub cols: u32,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Device pixels per logical pixel.
    pub pixel_ratio: f32,
    /// Seed for the crowd's random stream. `None` picks one at startup.
    pub seed: Option<u64>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for CrowdConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CrowdConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            sheet_path: PathBuf::from(DEFAULT_SHEET_PATH),
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            pixel_ratio: DEFAULT_PIXEL_RATIO,
            seed: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(ConfigError::Load)?;
        self.apply_ini(&config);

        info!(
            "Loaded config: sheet={:?} grid={}x{}, {}x{} window, fps={}, ratio={}, seed={:?}",
            self.sheet_path,
            self.rows,
            self.cols,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.pixel_ratio,
            self.seed
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, content: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(content.to_string()).map_err(ConfigError::Load)?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [sheet] section
        if let Some(path) = config.get("sheet", "path") {
            self.sheet_path = PathBuf::from(path);
        }
        if let Some(rows) = config.getuint("sheet", "rows").ok().flatten() {
            self.rows = rows as u32;
        }
        if let Some(cols) = config.getuint("sheet", "cols").ok().flatten() {
            self.cols = cols as u32;
        }

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(ratio) = config.getfloat("window", "pixel_ratio").ok().flatten() {
            self.pixel_ratio = ratio as f32;
        }

        // [crowd] section
        if let Some(seed) = config.getuint("crowd", "seed").ok().flatten() {
            self.seed = Some(seed);
        }
    }

    /// Check the grid before the sheet is sliced.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Number of peeps the sheet yields.
    pub fn crowd_size(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}
