//! Shape generation for 2D primitives
//!
//! Every function returns a triangle list in canvas pixels (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;
use crate::theme::{Color, with_alpha};

/// Linear blend between two colors
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Two triangles over four corners given clockwise or counter-clockwise
pub fn quad(corners: [Vec2; 4], colors: [Color; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    let [ca, cb, cc, cd] = colors;
    vec![
        Vertex::at(a, ca),
        Vertex::at(b, cb),
        Vertex::at(c, cc),
        Vertex::at(a, ca),
        Vertex::at(c, cc),
        Vertex::at(d, cd),
    ]
}

/// Filled axis-aligned rectangle
pub fn rect(r: Rect, color: Color) -> Vec<Vertex> {
    gradient_rect(r, color, color)
}

/// Rectangle with a vertical gradient from `top` to `bottom`
pub fn gradient_rect(r: Rect, top: Color, bottom: Color) -> Vec<Vertex> {
    quad(
        [
            Vec2::new(r.x, r.y),
            Vec2::new(r.right(), r.y),
            Vec2::new(r.right(), r.bottom()),
            Vec2::new(r.x, r.bottom()),
        ],
        [top, top, bottom, bottom],
    )
}

/// Stroke of `width` centered on the rectangle's edge
pub fn rect_outline(r: Rect, width: f32, color: Color) -> Vec<Vertex> {
    let half = width / 2.0;
    let outer = r.inset(-half);
    let mut vertices = Vec::with_capacity(24);
    // top, bottom, left, right
    vertices.extend(rect(Rect::new(outer.x, outer.y, outer.w, width), color));
    vertices.extend(rect(
        Rect::new(outer.x, outer.bottom() - width, outer.w, width),
        color,
    ));
    vertices.extend(rect(
        Rect::new(outer.x, outer.y + width, width, outer.h - 2.0 * width),
        color,
    ));
    vertices.extend(rect(
        Rect::new(outer.right() - width, outer.y + width, width, outer.h - 2.0 * width),
        color,
    ));
    vertices
}

/// Thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = dir.perp() * (width / 2.0);
    quad(
        [from + perp, to + perp, to - perp, from - perp],
        [color; 4],
    )
}

/// Square of side `size` centered on `center`, rotated by `angle` radians
/// (positive turns clockwise on screen)
pub fn rotated_square(center: Vec2, size: f32, angle: f32, color: Color) -> Vec<Vertex> {
    rotated_rect(center, Rect::new(-size / 2.0, -size / 2.0, size, size), angle, color)
}

/// Rectangle given in a local frame around `center`, rotated by `angle`
pub fn rotated_rect(center: Vec2, local: Rect, angle: f32, color: Color) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let corners = [
        Vec2::new(local.x, local.y),
        Vec2::new(local.right(), local.y),
        Vec2::new(local.right(), local.bottom()),
        Vec2::new(local.x, local.bottom()),
    ]
    .map(|p| center + rot.rotate(p));
    quad(corners, [color; 4])
}

/// Filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    shaded_circle(center, radius, segments, |_| color)
}

/// Circle whose color follows a vertical gradient from `top` at `y0` to
/// `bottom` at `y1` (clamped outside that band)
pub fn gradient_circle(
    center: Vec2,
    radius: f32,
    (y0, y1): (f32, f32),
    top: Color,
    bottom: Color,
    segments: u32,
) -> Vec<Vertex> {
    let span = (y1 - y0).max(f32::EPSILON);
    shaded_circle(center, radius, segments, |p| {
        lerp_color(top, bottom, (p.y - y0) / span)
    })
}

fn shaded_circle(
    center: Vec2,
    radius: f32,
    segments: u32,
    shade: impl Fn(Vec2) -> Color,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let center_color = shade(center);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = center + Vec2::from_angle(theta1) * radius;
        let p2 = center + Vec2::from_angle(theta2) * radius;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, center_color));
        vertices.push(Vertex::at(p1, shade(p1)));
        vertices.push(Vertex::at(p2, shade(p2)));
    }

    vertices
}

/// Soft halo around a rectangle, drawn before the shape itself
pub fn rect_glow(r: Rect, spread: f32, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for layer in (1..=GLOW_LAYERS).rev() {
        let grow = spread * layer as f32 / GLOW_LAYERS as f32;
        vertices.extend(rect(r.inset(-grow), with_alpha(color, GLOW_ALPHA)));
    }
    vertices
}

/// Soft halo around a circle
pub fn circle_glow(center: Vec2, radius: f32, spread: f32, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for layer in (1..=GLOW_LAYERS).rev() {
        let grow = spread * layer as f32 / GLOW_LAYERS as f32;
        vertices.extend(circle(
            center,
            radius + grow,
            with_alpha(color, GLOW_ALPHA),
            32,
        ));
    }
    vertices
}

/// Halo around a rotated square
pub fn square_glow(center: Vec2, size: f32, angle: f32, spread: f32, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for layer in (1..=GLOW_LAYERS).rev() {
        let grow = spread * layer as f32 / GLOW_LAYERS as f32;
        vertices.extend(rotated_square(
            center,
            size + 2.0 * grow,
            angle,
            with_alpha(color, GLOW_ALPHA),
        ));
    }
    vertices
}

/// Stacked translucent copies approximating a blur
const GLOW_LAYERS: u32 = 3;
const GLOW_ALPHA: f32 = 0.12;

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = [1.0; 4];
    const BLACK: Color = [0.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(Rect::new(10.0, 20.0, 30.0, 40.0), WHITE);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_gradient_rect_colors_by_row() {
        let v = gradient_rect(Rect::new(0.0, 0.0, 1.0, 1.0), WHITE, BLACK);
        for vert in &v {
            let expected = if vert.position[1] == 0.0 { WHITE } else { BLACK };
            assert_eq!(vert.color, expected);
        }
    }

    #[test]
    fn test_circle_radius() {
        let center = Vec2::new(5.0, 5.0);
        let v = circle(center, 3.0, WHITE, 16);
        assert_eq!(v.len(), 48);
        for vert in &v {
            let d = vert.pos().distance(center);
            assert!(d < 1e-4 || (d - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_gradient_circle_clamps() {
        let v = gradient_circle(Vec2::new(0.0, 200.0), 80.0, (100.0, 300.0), WHITE, BLACK, 32);
        // Center sits halfway down the band
        assert!((v[0].color[0] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_rotated_square_quarter_turn() {
        let v = rotated_square(Vec2::ZERO, 2.0, PI / 2.0, WHITE);
        // Corner (-1,-1) lands on (1,-1) after a clockwise quarter turn
        assert!((v[0].position[0] - 1.0).abs() < 1e-5);
        assert!((v[0].position[1] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_line_width() {
        let v = line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0, WHITE);
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert!(ys.iter().all(|y| (y.abs() - 1.0).abs() < 1e-5));
    }

    #[test]
    fn test_outline_stays_on_edge() {
        let r = Rect::new(0.0, 0.0, 50.0, 100.0);
        let v = rect_outline(r, 2.0, WHITE);
        assert_eq!(v.len(), 24);
        for vert in &v {
            let [x, y] = vert.position;
            assert!((-1.0..=51.0).contains(&x));
            assert!((-1.0..=101.0).contains(&y));
        }
    }

    #[test]
    fn test_lerp_color() {
        assert_eq!(lerp_color(BLACK, WHITE, 2.0), WHITE);
        assert_eq!(lerp_color(BLACK, WHITE, -1.0), BLACK);
    }
}
