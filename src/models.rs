use image::Rgba;

/// Theme colors shared by every logo element.
pub struct Palette;

impl Palette {
    /// #1F4BA7
    pub const PRIMARY: Rgba<u8> = Rgba([31, 75, 167, 255]);
    /// #83B4FF
    pub const PRIMARY_LIGHT: Rgba<u8> = Rgba([131, 180, 255, 255]);
    pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    /// Half-transparent black used under the lettering.
    pub const SHADOW: Rgba<u8> = Rgba([0, 0, 0, 128]);
}

/// The lettering drawn in the middle of the shield.
pub const LOGO_TEXT: &str = "VO";

/// Number of dots placed around the lettering.
pub const DOT_COUNT: usize = 9;

const OUTER_STROKE: u32 = 8;
const INNER_STROKE: u32 = 3;
const INNER_INSET: i32 = 20;
const SHADOW_OFFSET: i32 = 4;

/// A pixel coordinate. Signed so that geometry derived from very small
/// canvases can fall outside the image without wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A closed six-point outline together with its stroke width.
#[derive(Clone, Debug, PartialEq)]
pub struct Shield {
    pub points: [Point; 6],
    pub stroke: u32,
}

impl Shield {
    fn with_inset(size: i32, inset: i32, shoulder: i32, stroke: u32) -> Self {
        let center = size / 2;
        Self {
            points: [
                Point::new(center, inset),
                Point::new(size - inset, inset + shoulder),
                Point::new(size - inset, size - inset - shoulder),
                Point::new(center, size - inset / 2),
                Point::new(inset, size - inset - shoulder),
                Point::new(inset, inset + shoulder),
            ],
            stroke,
        }
    }
}

/// All geometry of the logo, derived from the canvas edge length.
///
/// Every value is an integer fraction of `size`, so rendering at a different
/// size scales every feature together.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoLayout {
    pub size: u32,
    pub center: Point,
    /// Radius of the largest disc in the background fade.
    pub fade_radius: u32,
    pub outer_shield: Shield,
    pub inner_shield: Shield,
    /// Requested pixel height of the lettering.
    pub font_px: f32,
    pub shadow_offset: i32,
    pub dot_radius: u32,
    pub dot_ring_radius: u32,
    pub dots: [Point; DOT_COUNT],
}

impl LogoLayout {
    pub fn for_size(size: u32) -> Self {
        let s = i32::try_from(size).unwrap_or(i32::MAX);
        let center = s / 2;
        let margin = s / 6;
        let dot_ring_radius = size / 3;

        let mut dots = [Point::new(center, center); DOT_COUNT];
        for (i, dot) in dots.iter_mut().enumerate() {
            let angle = (i as f64 * 360.0 / DOT_COUNT as f64).to_radians();
            // `as` truncates toward zero
            dot.x = center + (dot_ring_radius as f64 * angle.cos()) as i32;
            dot.y = center + (dot_ring_radius as f64 * angle.sin()) as i32;
        }

        Self {
            size,
            center: Point::new(center, center),
            fade_radius: size / 2,
            outer_shield: Shield::with_inset(s, margin, s / 6, OUTER_STROKE),
            inner_shield: Shield::with_inset(s, margin + INNER_INSET, s / 8, INNER_STROKE),
            font_px: (size / 3) as f32,
            shadow_offset: SHADOW_OFFSET,
            dot_radius: size / 50,
            dot_ring_radius,
            dots,
        }
    }
}
