//! Font face discovery and loading.
//!
//! The badge wordmark wants an italic bold sans face. A configured path wins,
//! then a short list of common system locations is searched, and finally the
//! DejaVu Sans Bold Oblique face compiled into the binary is used. Style
//! flags come from the file name so the rasterizer knows when to synthesise
//! italics or bold.

use ab_glyph::FontVec;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Face compiled into the binary (DejaVu license, see `fonts/LICENSE`).
const EMBEDDED_FONT_NAME: &str = "DejaVuSans-BoldOblique.ttf";
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSans-BoldOblique.ttf");

static EMBEDDED_FONT: OnceLock<Option<Arc<FontFace>>> = OnceLock::new();

/// System locations searched when no font path is configured, best match first.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// A parsed font face with its style flags.
pub struct FontFace {
    font: FontVec,
    name: String,
    italic: bool,
    bold: bool,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("name", &self.name)
            .field("italic", &self.italic)
            .field("bold", &self.bold)
            .finish()
    }
}

impl FontFace {
    /// Parse font data. Style flags are inferred from `name`.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Result<Self, String> {
        let name = name.into();
        let font = FontVec::try_from_vec(data)
            .map_err(|e| format!("Invalid font data in '{}': {}", name, e))?;
        let (italic, bold) = style_from_name(&name);
        Ok(Self {
            font,
            name,
            italic,
            bold,
        })
    }

    /// Read and parse a font file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| format!("Failed to read font file {}: {}", path.display(), e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_bytes(name, data)
    }

    pub fn font(&self) -> &FontVec {
        &self.font
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }
}

/// Resolves the font face used for the wordmark.
pub struct FontLibrary;

impl FontLibrary {
    /// Load the configured font, then system candidates, then the embedded
    /// face.
    ///
    /// A configured path that fails to load is logged and skipped. `None`
    /// only if the embedded face itself fails to parse.
    pub fn load(configured: Option<&Path>) -> Option<Arc<FontFace>> {
        let candidates = configured
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

        Self::load_first(candidates).or_else(|| {
            tracing::debug!(font = EMBEDDED_FONT_NAME, "Using embedded font face");
            Self::embedded()
        })
    }

    /// The embedded face, parsed once.
    pub fn embedded() -> Option<Arc<FontFace>> {
        EMBEDDED_FONT
            .get_or_init(|| {
                match FontFace::from_bytes(EMBEDDED_FONT_NAME, EMBEDDED_FONT_DATA.to_vec()) {
                    Ok(face) => Some(Arc::new(face)),
                    Err(e) => {
                        tracing::error!(error = %e, "Embedded font face is unusable");
                        None
                    }
                }
            })
            .clone()
    }

    /// Load the first candidate that exists and parses.
    pub fn load_first<I>(candidates: I) -> Option<Arc<FontFace>>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match FontFace::from_file(&path) {
                Ok(face) => {
                    tracing::debug!(
                        font = %path.display(),
                        italic = face.is_italic(),
                        bold = face.is_bold(),
                        "Loaded font face"
                    );
                    return Some(Arc::new(face));
                }
                Err(e) => {
                    tracing::warn!(font = %path.display(), error = %e, "Skipping unusable font");
                }
            }
        }

        None
    }
}

/// Infer (italic, bold) from a font file name.
fn style_from_name(name: &str) -> (bool, bool) {
    let lower = name.to_lowercase();
    let italic = lower.contains("italic") || lower.contains("oblique") || lower.ends_with("bi.ttf");
    let bold = lower.contains("bold") || lower.ends_with("bi.ttf") || lower.ends_with("bd.ttf");
    (italic, bold)
}
