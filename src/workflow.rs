use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, error, info, warn};

use crate::{
    column::assemble_column,
    config::{Config, TEMPLATE_HEIGHT, TEMPLATE_WIDTH},
    error::{PosterError, PosterResult},
    gradient::gradient_background,
    layout::{place_rotated, rotate_column},
    sampler::{accent_color, dominant_pair},
    text::{TitleFont, draw_title_block},
};

/// Grid cell priority by filename digit: the digit's position in this
/// string is its display rank. `1.jpg` and `2.jpg` land in the center row
/// of the first two columns (the most visible cells); `9.jpg` ends up in
/// the mostly covered bottom-left cell.
pub const PRIORITY_ORDER: &str = "315426987";

const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "gif", "webp"];

/// What a successful generation produced, including whether the gradient
/// colors came from the reference cover or from the neutral defaults.
#[derive(Debug)]
pub struct PosterArtifacts {
    pub output_path: PathBuf,
    pub columns: usize,
    pub used_fallback_colors: bool,
}

pub struct PosterWorkflow {
    config: Config,
}

impl PosterWorkflow {
    pub fn new(config: Config) -> PosterResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Boolean boundary for per-library callers: any error is logged with
    /// its library context and converted to `false`, so one failing library
    /// never disturbs the others.
    pub fn run(&self, name: &str) -> bool {
        match self.generate(name) {
            Ok(artifacts) => {
                info!(
                    server = %self.config.server_name,
                    library = %name,
                    output = %artifacts.output_path.display(),
                    "poster generated"
                );
                true
            }
            Err(err) => {
                error!(
                    server = %self.config.server_name,
                    library = %name,
                    error = %err,
                    "poster generation failed"
                );
                false
            }
        }
    }

    /// Runs the whole pipeline for one library: sample colors, paint the
    /// gradient, assemble/rotate/place each column, overlay titles, write
    /// the PNG.
    #[tracing::instrument(skip(self), fields(server = %self.config.server_name))]
    pub fn generate(&self, name: &str) -> PosterResult<PosterArtifacts> {
        let layout = &self.config.layout;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let poster_folder = self.config.posters_dir.join(name);
        let reference = poster_folder.join("2.jpg");
        let colors = dominant_pair(&reference);
        debug!(
            primary = ?colors.primary,
            secondary = ?colors.secondary,
            fallback = colors.fallback,
            "gradient colors"
        );

        let mut result = gradient_background(
            TEMPLATE_WIDTH,
            TEMPLATE_HEIGHT,
            Some(colors.primary),
            Some(colors.secondary),
            &mut rng,
        );

        fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!("create output dir '{}'", self.config.output_dir.display())
        })?;
        let columns_dir = self.config.output_dir.join("columns");
        if layout.save_columns {
            fs::create_dir_all(&columns_dir)
                .with_context(|| format!("create columns dir '{}'", columns_dir.display()))?;
        }

        let posters = discover_posters(&poster_folder)?;
        let max_posters = (layout.rows * layout.cols) as usize;
        let posters = &posters[..posters.len().min(max_posters)];

        let mut columns = 0usize;
        for (index, group) in posters
            .chunks(layout.rows as usize)
            .take(layout.cols as usize)
            .enumerate()
        {
            let column = assemble_column(group, layout);
            if layout.save_columns {
                let path = columns_dir.join(format!("{name}_column_{}_original.png", index + 1));
                column.image.save(&path).with_context(|| {
                    format!("save column original '{}'", path.display())
                })?;
                debug!(path = %path.display(), "saved column original");
            }

            let rotated = rotate_column(&column, layout.rotation_angle);
            if layout.save_columns {
                let path = columns_dir.join(format!("column_{}_rotated.png", index + 1));
                rotated
                    .save(&path)
                    .with_context(|| format!("save rotated column '{}'", path.display()))?;
                debug!(path = %path.display(), "saved rotated column");
            }

            place_rotated(&mut result, &rotated, index, layout);
            columns += 1;
        }

        let accent = accent_color(&posters[0], &mut rng);

        let (native, english) = self.config.resolve_titles(name);
        let native_font = self.load_font(&self.config.native_font_path());
        let latin_font = if english.is_empty() {
            None
        } else {
            self.load_font(&self.config.latin_font_path())
        };
        draw_title_block(
            &mut result,
            &native,
            &english,
            native_font.as_ref(),
            latin_font.as_ref(),
            accent,
        );

        let output_path = self.config.output_dir.join(format!("{name}.png"));
        result
            .save(&output_path)
            .with_context(|| format!("save poster '{}'", output_path.display()))?;

        Ok(PosterArtifacts {
            output_path,
            columns,
            used_fallback_colors: colors.fallback,
        })
    }

    /// A missing or unparseable font degrades to a skipped overlay rather
    /// than a failed library.
    fn load_font(&self, path: &Path) -> Option<TitleFont> {
        match TitleFont::load(path) {
            Ok(font) => Some(font),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "title font unavailable, skipping overlay");
                None
            }
        }
    }
}

/// Lists cover files whose stem is one of the priority digits and whose
/// extension is a supported raster format, sorted by display priority.
pub fn discover_posters(dir: &Path) -> PosterResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|err| PosterError::discovery(format!("list '{}': {err}", dir.display())))?;

    let mut ranked: Vec<(usize, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|err| PosterError::discovery(format!("list '{}': {err}", dir.display())))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(rank) = priority_rank(&path) else {
            continue;
        };
        ranked.push((rank, path));
    }

    if ranked.is_empty() {
        return Err(PosterError::discovery(format!(
            "no supported cover images in '{}'",
            dir.display()
        )));
    }

    ranked.sort_by_key(|(rank, _)| *rank);
    Ok(ranked.into_iter().map(|(_, path)| path).collect())
}

fn priority_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.chars().count() != 1 {
        return None;
    }
    PRIORITY_ORDER.find(stem)
}
