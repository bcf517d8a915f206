use crate::draw::{draw_mask, fill_circle, radial_fade, stroke_polygon};
use crate::font::LogoFont;
use crate::models::{LOGO_TEXT, LogoLayout, Palette, Point};
use image::RgbaImage;
use std::fmt;

/// Errors that prevent a canvas from being allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    ZeroSize,
    TooLarge(u32),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::ZeroSize => write!(f, "logo size must be positive"),
            RenderError::TooLarge(size) => write!(f, "a {size}x{size} canvas does not fit in memory"),
        }
    }
}

impl std::error::Error for RenderError {}

fn check_size(size: u32) -> Result<(), RenderError> {
    if size == 0 {
        return Err(RenderError::ZeroSize);
    }
    (size as usize)
        .checked_mul(size as usize)
        .and_then(|n| n.checked_mul(4))
        .map(|_| ())
        .ok_or(RenderError::TooLarge(size))
}

/// Renders the logo onto a fresh transparent `size` x `size` canvas, probing
/// the system for the lettering font.
pub fn render(size: u32) -> Result<RgbaImage, RenderError> {
    check_size(size)?;
    let font = LogoFont::resolve(LogoLayout::for_size(size).font_px);
    render_with_font(size, &font)
}

/// Same as [`render`] with the lettering font supplied by the caller.
pub fn render_with_font(size: u32, font: &LogoFont) -> Result<RgbaImage, RenderError> {
    check_size(size)?;
    let layout = LogoLayout::for_size(size);
    let mut canvas = RgbaImage::new(size, size);

    radial_fade(&mut canvas, layout.center, layout.fade_radius, Palette::PRIMARY);

    let outer = &layout.outer_shield;
    stroke_polygon(&mut canvas, &outer.points, outer.stroke, Palette::PRIMARY_LIGHT);
    let inner = &layout.inner_shield;
    stroke_polygon(&mut canvas, &inner.points, inner.stroke, Palette::WHITE);

    let run = font.rasterize(LOGO_TEXT);
    if run.is_empty() {
        log::debug!("lettering skipped at {size}px with {}", font.describe());
    } else {
        let (w, h) = run.size();
        let s = size as i64;
        let origin = Point::new(
            (s - w as i64).div_euclid(2) as i32,
            (s - h as i64).div_euclid(2) as i32,
        );
        let shadow = Point::new(origin.x + layout.shadow_offset, origin.y + layout.shadow_offset);
        draw_mask(&mut canvas, &run.mask, shadow, Palette::SHADOW);
        draw_mask(&mut canvas, &run.mask, origin, Palette::WHITE);
    }

    for dot in layout.dots {
        fill_circle(&mut canvas, dot, layout.dot_radius, Palette::PRIMARY_LIGHT);
    }

    Ok(canvas)
}
