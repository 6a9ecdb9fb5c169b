//! Shape generation for 2D primitives
//!
//! Every function appends a triangle list to `out`.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

#[inline]
fn push_triangle(out: &mut Vec<Vertex>, a: Vec2, ca: [f32; 4], b: Vec2, cb: [f32; 4], c: Vec2, cc: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, ca));
    out.push(Vertex::new(b.x, b.y, cb));
    out.push(Vertex::new(c.x, c.y, cc));
}

/// Point on a circle
#[inline]
fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    center + Vec2::new(radius * theta.cos(), radius * theta.sin())
}

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    let tr = Vec2::new(max.x, min.y);
    let bl = Vec2::new(min.x, max.y);
    push_triangle(out, min, color, tr, color, max, color);
    push_triangle(out, min, color, max, color, bl, color);
}

/// Rectangle filling `[min, max]` with a top → middle → bottom gradient
pub fn vertical_gradient(
    out: &mut Vec<Vertex>,
    min: Vec2,
    max: Vec2,
    top: [f32; 4],
    middle: [f32; 4],
    bottom: [f32; 4],
) {
    let mid_y = (min.y + max.y) / 2.0;
    let bands = [(min.y, top, mid_y, middle), (mid_y, middle, max.y, bottom)];
    for (y0, c0, y1, c1) in bands {
        let tl = Vec2::new(min.x, y0);
        let tr = Vec2::new(max.x, y0);
        let bl = Vec2::new(min.x, y1);
        let br = Vec2::new(max.x, y1);
        push_triangle(out, tl, c0, tr, c0, br, c1);
        push_triangle(out, tl, c0, br, c1, bl, c1);
    }
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    radial_circle(out, center, radius, color, color, segments);
}

/// Filled circle whose color blends from `inner` at the center to `outer` at the rim
pub fn radial_circle(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        push_triangle(
            out,
            center,
            inner,
            on_circle(center, radius, theta1),
            outer,
            on_circle(center, radius, theta2),
            outer,
        );
    }
}

/// Filled polygon, fanned from `center`.
///
/// Correct for any polygon that is star-shaped around `center`, which covers
/// asteroid outlines and the ship hull.
pub fn polygon_fan(out: &mut Vec<Vertex>, center: Vec2, points: &[Vec2], color: [f32; 4]) {
    if points.len() < 3 {
        return;
    }
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        push_triangle(out, center, color, a, color, b, color);
    }
}

/// Closed outline of constant width
pub fn polyline_closed(out: &mut Vec<Vertex>, points: &[Vec2], width: f32, color: [f32; 4]) {
    if points.len() < 2 {
        return;
    }
    let half = width / 2.0;
    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];

        // Perpendicular for width
        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        // Quad corners
        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        push_triangle(out, v1a, color, v1b, color, v2a, color);
        push_triangle(out, v2a, color, v1b, color, v2b, color);
    }
}

/// Five-pointed star (inner radius 40% of outer)
pub fn star(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4]) {
    let num_points = 5;
    let inner = radius * 0.4;
    let points: Vec<Vec2> = (0..num_points * 2)
        .map(|i| {
            let theta = i as f32 * PI / num_points as f32;
            let r = if i % 2 == 0 { radius } else { inner };
            on_circle(center, r, theta)
        })
        .collect();
    polygon_fan(out, center, &points, color);
}

/// Heart: two lobes over a downward point
pub fn heart(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4]) {
    let lobe = radius * 0.5;
    let lobe_y = center.y - radius * 0.2;
    circle(out, Vec2::new(center.x - lobe * 0.9, lobe_y), lobe, color, 12);
    circle(out, Vec2::new(center.x + lobe * 0.9, lobe_y), lobe, color, 12);
    let left = Vec2::new(center.x - lobe * 1.85, lobe_y + lobe * 0.3);
    let right = Vec2::new(center.x + lobe * 1.85, lobe_y + lobe * 0.3);
    let tip = Vec2::new(center.x, center.y + radius);
    push_triangle(out, left, color, right, color, tip, color);
}

/// Hexagonal shield, taller than wide
pub fn shield(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4]) {
    let w = radius * 1.2 * 0.5;
    let h = radius * 1.4 * 0.5;
    let points = [
        Vec2::new(center.x, center.y - h),
        Vec2::new(center.x + w, center.y - h * 0.4),
        Vec2::new(center.x + w, center.y + h * 0.4),
        Vec2::new(center.x, center.y + h),
        Vec2::new(center.x - w, center.y + h * 0.4),
        Vec2::new(center.x - w, center.y - h * 0.4),
    ];
    polygon_fan(out, center, &points, color);
}
