//! Application settings

use serde::{Deserialize, Serialize};

/// Grid display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Grid cell size in world units
    pub cell_size: f32,
    /// Number of grid lines in each direction from origin
    pub range: i32,
    /// Emphasize every n-th line as a section line
    pub section_every: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            range: 60,
            section_every: 15,
            opacity: 0.6,
        }
    }
}

/// Axis display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSettings {
    /// Show axes
    pub visible: bool,
    /// Axis arrow length
    pub length: f32,
    /// Axis line thickness
    pub thickness: f32,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            visible: true,
            length: 1.5,
            thickness: 2.0,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 35],
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppSettings {
    /// Grid settings
    pub grid: GridSettings,
    /// Axis settings
    pub axes: AxisSettings,
    /// Viewport settings
    pub viewport: ViewportSettings,
    /// UI settings
    pub ui: UiSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "meshview", "meshview") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    return settings;
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "meshview", "meshview") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    let _ = std::fs::write(config_path, json);
                }
            }
        }
    }
}
