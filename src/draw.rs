//! Raster primitives used by the logo renderer.
//!
//! All primitives replace the pixels they touch instead of compositing over
//! them. Callers rely on this: the background fade, for instance, ends up with
//! a transparent middle because smaller discs overwrite larger ones.

use crate::models::Point;
use image::{GrayImage, Rgba, RgbaImage};

/// Inclusive pixel bounds clipped to the canvas, or `None` if nothing is visible.
fn clip(canvas: &RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return None;
    }
    let x0 = x0.max(0);
    let y0 = y0.max(0);
    let x1 = x1.min(w as i64 - 1);
    let y1 = y1.min(h as i64 - 1);
    if x0 > x1 || y0 > y1 {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

/// Whether a pixel lies in the disc whose bounding box is `[c - r, c + r]`.
fn in_disc(dx: i64, dy: i64, radius: i64) -> bool {
    4 * (dx * dx + dy * dy) <= (2 * radius + 1) * (2 * radius + 1)
}

/// Fills a disc centered on `center`. A radius of zero paints a single pixel.
pub fn fill_circle(canvas: &mut RgbaImage, center: Point, radius: u32, color: Rgba<u8>) {
    let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
    let Some((x0, y0, x1, y1)) = clip(canvas, cx - r, cy - r, cx + r, cy + r) else {
        return;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            if in_disc(x as i64 - cx, y as i64 - cy, r) {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

/// Alpha of the fade disc with the given radius.
pub fn fade_alpha(radius: u32, max_radius: u32) -> u8 {
    let alpha = (255.0 * (radius as f64 / max_radius as f64)) as u32;
    alpha.min(255) as u8
}

/// Smallest disc radius (at least 1) that covers a pixel at squared distance `d2`.
fn covering_radius(d2: i64) -> i64 {
    let t = 4 * d2;
    let mut r = (((t as f64).sqrt() - 1.0) / 2.0).ceil().max(1.0) as i64;
    while (2 * r + 1) * (2 * r + 1) < t {
        r += 1;
    }
    while r > 1 && (2 * r - 1) * (2 * r - 1) >= t {
        r -= 1;
    }
    r
}

/// Paints the background fade: discs of radius `max_radius` down to 1, each in
/// `color` with an alpha proportional to its radius.
///
/// Rather than overpainting every disc, each pixel takes the color of the
/// smallest disc that covers it, which is what the overpaint leaves behind.
pub fn radial_fade(canvas: &mut RgbaImage, center: Point, max_radius: u32, color: Rgba<u8>) {
    if max_radius == 0 {
        return;
    }
    let (cx, cy, max) = (center.x as i64, center.y as i64, max_radius as i64);
    let Some((x0, y0, x1, y1)) = clip(canvas, cx - max, cy - max, cx + max, cy + max) else {
        return;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            let r = covering_radius(dx * dx + dy * dy);
            if r > max {
                continue;
            }
            let Rgba([red, green, blue, _]) = color;
            let alpha = fade_alpha(r as u32, max_radius);
            canvas.put_pixel(x, y, Rgba([red, green, blue, alpha]));
        }
    }
}

fn distance_to_segment(px: f64, py: f64, a: Point, b: Point) -> f64 {
    let (ax, ay, bx, by) = (a.x as f64, a.y as f64, b.x as f64, b.y as f64);
    let (vx, vy) = (bx - ax, by - ay);
    let len2 = vx * vx + vy * vy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((px - ax) * vx + (py - ay) * vy) / len2).clamp(0.0, 1.0)
    };
    let (qx, qy) = (ax + t * vx, ay + t * vy);
    ((px - qx).powi(2) + (py - qy).powi(2)).sqrt()
}

/// Even-odd containment test against the closed polygon.
fn contains(points: &[Point], px: f64, py: f64) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = (points[i].x as f64, points[i].y as f64);
        let (xj, yj) = (points[j].x as f64, points[j].y as f64);
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Draws the outline of a closed polygon. The stroke grows inward from the
/// edges, so the outline never extends past the polygon's own shape.
pub fn stroke_polygon(canvas: &mut RgbaImage, points: &[Point], width: u32, color: Rgba<u8>) {
    if points.len() < 2 || width == 0 {
        return;
    }
    let min_x = points.iter().map(|p| p.x).min().unwrap_or(0) as i64;
    let max_x = points.iter().map(|p| p.x).max().unwrap_or(0) as i64;
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0) as i64;
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0) as i64;
    let Some((x0, y0, x1, y1)) = clip(canvas, min_x, min_y, max_x, max_y) else {
        return;
    };

    let width = width as f64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let (px, py) = (x as f64, y as f64);
            let dist = points
                .iter()
                .zip(points.iter().cycle().skip(1))
                .map(|(&a, &b)| distance_to_segment(px, py, a, b))
                .fold(f64::INFINITY, f64::min);
            if dist < width && (dist <= 0.5 || contains(points, px, py)) {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

fn blend_channel(dst: u8, src: u8, coverage: u8) -> u8 {
    let a = coverage as u32;
    ((dst as u32 * (255 - a) + src as u32 * a + 127) / 255) as u8
}

/// Paints `color` through a coverage mask whose top-left corner sits at `origin`.
///
/// Every channel, alpha included, moves from the existing pixel toward `color`
/// in proportion to the mask's coverage.
pub fn draw_mask(canvas: &mut RgbaImage, mask: &GrayImage, origin: Point, color: Rgba<u8>) {
    let (mw, mh) = mask.dimensions();
    let (ox, oy) = (origin.x as i64, origin.y as i64);
    let Some((x0, y0, x1, y1)) = clip(canvas, ox, oy, ox + mw as i64 - 1, oy + mh as i64 - 1)
    else {
        return;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            let coverage = mask.get_pixel((x as i64 - ox) as u32, (y as i64 - oy) as u32).0[0];
            if coverage == 0 {
                continue;
            }
            let dst = canvas.get_pixel_mut(x, y);
            for c in 0..4 {
                dst.0[c] = blend_channel(dst.0[c], color.0[c], coverage);
            }
        }
    }
}
