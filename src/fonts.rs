//! Best-effort text rendering setup for downstream plotting of layouts.
//!
//! Nothing in placement depends on this. Every failure is swallowed and logged.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const FONT_ENV_VAR: &str = "PLANT_LAYOUT_FONT";
/// Older name, still honoured when [`FONT_ENV_VAR`] is unset.
pub const HANGUL_FONT_ENV_VAR: &str = "HANGUL_FONT_PATH";
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/nanum/NanumGothic.ttf";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRendering {
    pub font_path: PathBuf,
    pub family: String,
    pub face_count: usize,
}

static TEXT_RENDERING: OnceLock<Option<TextRendering>> = OnceLock::new();

/// Configure the font once per process. Later calls return the first result.
pub fn init_text_rendering() -> Option<&'static TextRendering> {
    TEXT_RENDERING
        .get_or_init(|| {
            let path = font_path_from_env();
            match load_font(&path) {
                Ok(cfg) => {
                    tracing::debug!(family = %cfg.family, path = %path.display(), "font configured");
                    Some(cfg)
                }
                Err(reason) => {
                    tracing::debug!(path = %path.display(), %reason, "font setup skipped");
                    None
                }
            }
        })
        .as_ref()
}

/// The configuration recorded by [`init_text_rendering`], if it ran and succeeded.
pub fn text_rendering() -> Option<&'static TextRendering> {
    TEXT_RENDERING.get().and_then(Option::as_ref)
}

pub fn font_path_from_env() -> PathBuf {
    resolve_font_path(
        std::env::var_os(FONT_ENV_VAR).map(PathBuf::from),
        std::env::var_os(HANGUL_FONT_ENV_VAR).map(PathBuf::from),
    )
}

fn resolve_font_path(preferred: Option<PathBuf>, hangul: Option<PathBuf>) -> PathBuf {
    [preferred, hangul]
        .into_iter()
        .flatten()
        .find(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_PATH))
}

pub fn load_font(path: &Path) -> Result<TextRendering, String> {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_file(path)
        .map_err(|e| format!("read font '{}': {e}", path.display()))?;

    let face_count = db.faces().count();
    let family = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| format!("no usable font faces in '{}'", path.display()))?;

    Ok(TextRendering {
        font_path: path.to_path_buf(),
        family,
        face_count,
    })
}
