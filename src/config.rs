use directories::ProjectDirs;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::error::{Error, Result};
use crate::stats::SeriesKind;

/// Chart appearance settings persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// ratatui color name or `#rrggbb`
    pub max_color: String,
    pub avg_color: String,
    /// draw point markers on top of the lines
    pub points: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Solver statistics".to_string(),
            x_title: "difficulty".to_string(),
            y_title: "value".to_string(),
            max_color: "red".to_string(),
            avg_color: "cyan".to_string(),
            points: true,
        }
    }
}

impl Config {
    fn color_name(&self, kind: SeriesKind) -> &str {
        match kind {
            SeriesKind::Max => &self.max_color,
            SeriesKind::Avg => &self.avg_color,
        }
    }

    /// Resolved color for a series; unknown names fall back to the default.
    pub fn color(&self, kind: SeriesKind) -> Color {
        let fallback = match kind {
            SeriesKind::Max => Color::Red,
            SeriesKind::Avg => Color::Cyan,
        };
        Color::from_str(self.color_name(kind)).unwrap_or(fallback)
    }

    fn warn_unknown_colors(&self) {
        for kind in SeriesKind::ALL {
            let name = self.color_name(kind);
            if Color::from_str(name).is_err() {
                warn!(color = %name, series = %kind, "unknown color, using default");
            }
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "diffplot") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("diffplot_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => {
                cfg.warn_unknown_colors();
                cfg
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring invalid config file");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(|source| Error::Config {
            path: self.path.display().to_string(),
            source,
        })?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
