//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in screen pixels (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Segments used for coin circles
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Append a filled rectangle (two triangles)
pub fn rect(out: &mut Vec<Vertex>, r: &Rect, color: [f32; 4]) {
    if r.w <= 0.0 || r.h <= 0.0 {
        return;
    }
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());

    out.push(Vertex::new(l, t, color));
    out.push(Vertex::new(l, b, color));
    out.push(Vertex::new(rt, t, color));

    out.push(Vertex::new(rt, t, color));
    out.push(Vertex::new(l, b, color));
    out.push(Vertex::new(rt, b, color));
}

/// Append a border of `thickness` drawn inside the rectangle
pub fn rect_outline(out: &mut Vec<Vertex>, r: &Rect, thickness: f32, color: [f32; 4]) {
    let t = thickness.min(r.w / 2.0).min(r.h / 2.0);
    // Top and bottom span the full width; sides fill the gap between them
    rect(out, &Rect::new(r.x, r.y, r.w, t), color);
    rect(out, &Rect::new(r.x, r.bottom() - t, r.w, t), color);
    rect(out, &Rect::new(r.x, r.y + t, t, r.h - 2.0 * t), color);
    rect(out, &Rect::new(r.right() - t, r.y + t, t, r.h - 2.0 * t), color);
}

/// Append a thick line segment centered on `a`-`b`
pub fn line(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO || width <= 0.0 {
        return;
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let v1a = a + perp;
    let v1b = a - perp;
    let v2a = b + perp;
    let v2b = b - perp;

    out.push(Vertex::new(v1a.x, v1a.y, color));
    out.push(Vertex::new(v1b.x, v1b.y, color));
    out.push(Vertex::new(v2a.x, v2a.y, color));

    out.push(Vertex::new(v2a.x, v2a.y, color));
    out.push(Vertex::new(v1b.x, v1b.y, color));
    out.push(Vertex::new(v2b.x, v2b.y, color));
}

/// Append a filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    if radius <= 0.0 || segments < 3 {
        return;
    }

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}
