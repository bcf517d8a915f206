use image::{GrayImage, Luma, imageops};
use std::fmt;
use std::path::{Path, PathBuf};

/// Bold faces probed for the lettering, in order of preference.
pub const FONT_CANDIDATES: [&str; 2] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
];

/// Error returned when a candidate font file cannot be used.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Tries each candidate in order and returns the first one `load` accepts.
///
/// Failures are logged and skipped; `None` means every candidate failed.
pub fn first_available<C, T, E>(
    candidates: impl IntoIterator<Item = C>,
    mut load: impl FnMut(&C) -> Result<T, E>,
) -> Option<T>
where
    C: fmt::Debug,
    E: fmt::Display,
{
    candidates.into_iter().find_map(|candidate| match load(&candidate) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("skipping {candidate:?}: {e}");
            None
        }
    })
}

/// Reads and parses a TrueType/OpenType file.
pub fn load_truetype(path: &Path) -> Result<fontdue::Font, FontLoadError> {
    let bytes = std::fs::read(path).map_err(|e| FontLoadError(format!("{}: {e}", path.display())))?;
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| FontLoadError(format!("{}: {e}", path.display())))
}

/// The face used for the lettering, already bound to a pixel size.
pub enum LogoFont {
    TrueType {
        font: fontdue::Font,
        px: f32,
        path: PathBuf,
    },
    /// Compiled-in 5x7 bitmap face, always available.
    Builtin { px: f32 },
}

impl LogoFont {
    /// Resolves the lettering font from [`FONT_CANDIDATES`].
    pub fn resolve(px: f32) -> Self {
        Self::resolve_from(FONT_CANDIDATES, px)
    }

    /// Resolves from an explicit candidate list, falling back to the built-in
    /// face when none of the paths can be loaded. Never fails.
    pub fn resolve_from<P: AsRef<Path>>(candidates: impl IntoIterator<Item = P>, px: f32) -> Self {
        let found = first_available(
            candidates.into_iter().map(|p| p.as_ref().to_path_buf()),
            |path| load_truetype(path).map(|font| (font, path.clone())),
        );
        let font = match found {
            Some((font, path)) => LogoFont::TrueType { font, px, path },
            None => LogoFont::Builtin { px },
        };
        log::debug!("lettering font: {}", font.describe());
        font
    }

    pub fn px(&self) -> f32 {
        match self {
            LogoFont::TrueType { px, .. } | LogoFont::Builtin { px } => *px,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            LogoFont::TrueType { path, px, .. } => format!("{} @ {px}px", path.display()),
            LogoFont::Builtin { px } => format!("built-in bitmap face @ {px}px"),
        }
    }

    /// Rasterizes `text` into a coverage mask cropped to its inked area.
    pub fn rasterize(&self, text: &str) -> GlyphRun {
        let mask = match self {
            LogoFont::TrueType { font, px, .. } => rasterize_truetype(font, *px, text),
            LogoFont::Builtin { px } => rasterize_builtin(*px, text),
        };
        GlyphRun {
            mask: trim_to_ink(&mask),
        }
    }
}

/// A rendered line of text.
pub struct GlyphRun {
    pub mask: GrayImage,
}

impl GlyphRun {
    /// Width and height of the inked area.
    pub fn size(&self) -> (u32, u32) {
        self.mask.dimensions()
    }

    pub fn is_empty(&self) -> bool {
        let (w, h) = self.size();
        w == 0 || h == 0
    }
}

fn trim_to_ink(mask: &GrayImage) -> GrayImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel.0[0] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    match bounds {
        Some((x0, y0, x1, y1)) => imageops::crop_imm(mask, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image(),
        None => GrayImage::new(0, 0),
    }
}

fn rasterize_truetype(font: &fontdue::Font, px: f32, text: &str) -> GrayImage {
    if px < 1.0 {
        return GrayImage::new(0, 0);
    }

    // (x, y, width, height, coverage) with y measured down from the baseline
    let mut placed = Vec::new();
    let mut pen = 0.0f32;
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if let Some(left) = prev {
            pen += font.horizontal_kern(left, ch, px).unwrap_or(0.0);
        }
        let (metrics, bitmap) = font.rasterize(ch, px);
        if metrics.width > 0 && metrics.height > 0 {
            let x = pen.round() as i32 + metrics.xmin;
            let y = -(metrics.ymin + metrics.height as i32);
            placed.push((x, y, metrics.width as u32, metrics.height as u32, bitmap));
        }
        pen += metrics.advance_width;
        prev = Some(ch);
    }

    let Some(min_x) = placed.iter().map(|g| g.0).min() else {
        return GrayImage::new(0, 0);
    };
    let min_y = placed.iter().map(|g| g.1).min().unwrap_or(0);
    let max_x = placed.iter().map(|g| g.0 + g.2 as i32).max().unwrap_or(min_x);
    let max_y = placed.iter().map(|g| g.1 + g.3 as i32).max().unwrap_or(min_y);

    let mut mask = GrayImage::new((max_x - min_x) as u32, (max_y - min_y) as u32);
    for (gx, gy, w, h, bitmap) in &placed {
        let (ox, oy) = ((gx - min_x) as u32, (gy - min_y) as u32);
        for row in 0..*h {
            for col in 0..*w {
                let coverage = bitmap[(row * w + col) as usize];
                let dst = mask.get_pixel_mut(ox + col, oy + row);
                // overlapping glyphs keep the stronger coverage
                dst.0[0] = dst.0[0].max(coverage);
            }
        }
    }
    mask
}

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;

/// Rows of a 5x7 glyph, most significant of the low five bits leftmost.
fn builtin_glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        _ => return None,
    };
    Some(rows)
}

fn rasterize_builtin(px: f32, text: &str) -> GrayImage {
    // cap height is roughly seven tenths of the requested size
    let scale = (px / 10.0) as u32;
    let count = text.chars().count() as u32;
    if scale == 0 || count == 0 {
        return GrayImage::new(0, 0);
    }

    let advance = (GLYPH_W + 1) * scale;
    let mut mask = GrayImage::new(advance * count - scale, GLYPH_H * scale);
    for (i, ch) in text.chars().enumerate() {
        // unknown characters advance like a space
        let Some(rows) = builtin_glyph(ch) else {
            continue;
        };
        let left = i as u32 * advance;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let x = left + col * scale + dx;
                        let y = row as u32 * scale + dy;
                        mask.put_pixel(x, y, Luma([255]));
                    }
                }
            }
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("verum-logo-font-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn first_available_returns_first_success() {
        let loaded = first_available([1, 2, 3, 4], |n| if n % 2 == 0 { Ok(*n) } else { Err("odd") });
        assert_eq!(loaded, Some(2));
    }

    #[test]
    fn first_available_stops_at_first_success() {
        let mut tried = Vec::new();
        let _ = first_available(["a", "b", "c"], |c| {
            tried.push(*c);
            if *c == "b" { Ok(()) } else { Err("no") }
        });
        assert_eq!(tried, ["a", "b"]);
    }

    #[test]
    fn first_available_exhausted_is_none() {
        let loaded: Option<u8> = first_available(["x", "y"], |_| Err::<u8, _>("missing"));
        assert!(loaded.is_none());
    }

    #[test]
    fn missing_files_fall_back_to_builtin() {
        let font = LogoFont::resolve_from(["/nonexistent/a.ttf", "/nonexistent/b.ttf"], 170.0);
        assert!(matches!(font, LogoFont::Builtin { .. }));
        assert_eq!(font.px(), 170.0);
    }

    #[test]
    fn unparsable_file_falls_back_to_builtin() {
        let dir = scratch_dir("garbage");
        let bogus = dir.join("bogus.ttf");
        std::fs::write(&bogus, b"definitely not a font").unwrap();

        let font = LogoFont::resolve_from([&bogus], 64.0);
        assert!(matches!(font, LogoFont::Builtin { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_candidate_list_falls_back_to_builtin() {
        let font = LogoFont::resolve_from(Vec::<PathBuf>::new(), 12.0);
        assert!(matches!(font, LogoFont::Builtin { .. }));
    }

    #[test]
    fn system_resolution_always_yields_usable_font() {
        let font = LogoFont::resolve(170.0);
        let run = font.rasterize("VO");
        assert!(!run.is_empty(), "{} produced no ink", font.describe());
    }

    #[test]
    fn builtin_run_is_measured_on_its_ink() {
        let run = LogoFont::Builtin { px: 170.0 }.rasterize("VO");
        // scale 17: two 5-wide cells and a 1-wide gap, seven rows tall
        assert_eq!(run.size(), (11 * 17, 7 * 17));
        assert_eq!(run.mask.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn builtin_is_case_insensitive() {
        let upper = LogoFont::Builtin { px: 40.0 }.rasterize("VO");
        let lower = LogoFont::Builtin { px: 40.0 }.rasterize("vo");
        assert_eq!(upper.mask, lower.mask);
    }

    #[test]
    fn too_small_or_blank_text_is_empty() {
        assert!(LogoFont::Builtin { px: 3.0 }.rasterize("VO").is_empty());
        assert!(LogoFont::Builtin { px: 40.0 }.rasterize("").is_empty());
        assert!(LogoFont::Builtin { px: 40.0 }.rasterize("  ").is_empty());
    }
}
