//! Shape generation for 2D primitives
//!
//! All output is in game coordinates; the pipeline maps to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::scene::{CircleShape, RectShape, palette};

/// Segments used for the ball
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Generate vertices for a filled axis-aligned rectangle (center origin)
pub fn rect(center: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let h = size / 2.0;
    let (l, r, t, b) = (center.x - h.x, center.x + h.x, center.y - h.y, center.y + h.y);

    vec![
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Paddle: black border, inset fill
pub fn outlined_rect(shape: &RectShape) -> Vec<Vertex> {
    let mut vertices = rect(shape.center, shape.size, palette::OUTLINE);
    let inner = (shape.size - Vec2::splat(shape.outline * 2.0)).max(Vec2::ZERO);
    vertices.extend(rect(shape.center, inner, shape.fill));
    vertices
}

/// Ball: black rim, inset fill
pub fn outlined_circle(shape: &CircleShape) -> Vec<Vertex> {
    let mut vertices = circle(shape.center, shape.radius, palette::OUTLINE, CIRCLE_SEGMENTS);
    let inner = (shape.radius - shape.outline).max(0.0);
    vertices.extend(circle(shape.center, inner, shape.fill, CIRCLE_SEGMENTS));
    vertices
}
