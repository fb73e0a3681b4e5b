use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::error::{PosterError, PosterResult};

/// Composite canvas size. The placement calibration constants in
/// [`crate::layout`] are tuned against this template and do not transfer to
/// other sizes, so it is fixed rather than configurable.
pub const TEMPLATE_WIDTH: u32 = 1920;
pub const TEMPLATE_HEIGHT: u32 = 1080;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display name used only in log context.
    pub server_name: String,
    /// Root directory holding one sub-directory of covers per library.
    pub posters_dir: PathBuf,
    /// Directory the composite PNG (and optional column intermediates) go to.
    pub output_dir: PathBuf,
    /// Base directory for font assets.
    pub fonts_dir: PathBuf,
    /// Native-script title font, relative to `fonts_dir`.
    pub native_font: PathBuf,
    /// Latin title font, relative to `fonts_dir`.
    pub latin_font: PathBuf,
    pub layout: LayoutConfig,
    /// Library name -> localized titles, first exact match wins.
    pub libraries: Vec<LibraryTitles>,
    /// Fixed seed for the palette/accent samplers; OS entropy when absent.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub rows: u32,
    pub cols: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub margin: u32,
    pub corner_radius: u32,
    /// Degrees, counterclockwise, shared by all columns.
    pub rotation_angle: f64,
    pub start_x: i64,
    pub start_y: i64,
    pub column_spacing: i64,
    /// Persist pre- and post-rotation column images next to the output.
    pub save_columns: bool,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LibraryTitles {
    pub name: String,
    pub native: String,
    pub english: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_name: "jellyfin".to_string(),
            posters_dir: PathBuf::from("poster"),
            output_dir: PathBuf::from("output"),
            fonts_dir: PathBuf::from("font"),
            native_font: PathBuf::from("ch.ttf"),
            latin_font: PathBuf::from("en.otf"),
            layout: LayoutConfig::default(),
            libraries: Vec::new(),
            seed: None,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            cell_width: 400,
            cell_height: 600,
            margin: 40,
            corner_radius: 30,
            rotation_angle: 15.0,
            start_x: 880,
            start_y: -400,
            column_spacing: 420,
            save_columns: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> PosterResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Config =
            serde_json::from_reader(BufReader::new(f)).context("parse config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PosterResult<()> {
        let l = &self.layout;
        if l.rows == 0 || l.cols == 0 {
            return Err(PosterError::config("layout rows/cols must be > 0"));
        }
        if l.cell_width == 0 || l.cell_height == 0 {
            return Err(PosterError::config("layout cell dimensions must be > 0"));
        }
        if !l.rotation_angle.is_finite() {
            return Err(PosterError::config("rotation angle must be finite"));
        }
        Ok(())
    }

    /// Resolves `(native, english)` display titles for a library. Absent or
    /// partial entries fall back to the input name and an empty english
    /// title (which suppresses the english text and accent block).
    pub fn resolve_titles(&self, name: &str) -> (String, String) {
        for entry in &self.libraries {
            if entry.name == name {
                let native = if entry.native.is_empty() {
                    name.to_string()
                } else {
                    entry.native.clone()
                };
                return (native, entry.english.clone());
            }
        }
        (name.to_string(), String::new())
    }

    pub fn native_font_path(&self) -> PathBuf {
        self.fonts_dir.join(&self.native_font)
    }

    pub fn latin_font_path(&self) -> PathBuf {
        self.fonts_dir.join(&self.latin_font)
    }
}

impl LayoutConfig {
    /// Stacked column height before the shadow growth budget.
    pub fn column_height(&self) -> u32 {
        self.rows * self.cell_height + self.rows.saturating_sub(1) * self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn zero_rows_is_rejected() {
        let mut cfg = Config::default();
        cfg.layout.rows = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn titles_fall_back_to_input_name() {
        let cfg = Config::default();
        let (native, english) = cfg.resolve_titles("Hot TV");
        assert_eq!(native, "Hot TV");
        assert_eq!(english, "");
    }

    #[test]
    fn titles_first_match_wins() {
        let mut cfg = Config::default();
        cfg.libraries.push(LibraryTitles {
            name: "movies".to_string(),
            native: "电影".to_string(),
            english: "Movies".to_string(),
        });
        cfg.libraries.push(LibraryTitles {
            name: "movies".to_string(),
            native: "second".to_string(),
            english: "ignored".to_string(),
        });
        let (native, english) = cfg.resolve_titles("movies");
        assert_eq!(native, "电影");
        assert_eq!(english, "Movies");
    }

    #[test]
    fn partial_entry_keeps_input_native_name() {
        let mut cfg = Config::default();
        cfg.libraries.push(LibraryTitles {
            name: "anime".to_string(),
            native: String::new(),
            english: "Anime".to_string(),
        });
        let (native, english) = cfg.resolve_titles("anime");
        assert_eq!(native, "anime");
        assert_eq!(english, "Anime");
    }

    #[test]
    fn column_height_includes_margins() {
        let l = LayoutConfig::default();
        assert_eq!(l.column_height(), 3 * 600 + 2 * 40);
    }

    #[test]
    fn config_json_roundtrip_with_missing_fields() {
        let cfg: Config = serde_json::from_str(r#"{ "server_name": "nas" }"#).unwrap();
        assert_eq!(cfg.server_name, "nas");
        assert_eq!(cfg.layout.rows, 3);
        cfg.validate().unwrap();
    }
}
