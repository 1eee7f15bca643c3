//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

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

/// Generate vertices for a filled circular sector ("pie slice").
///
/// Starts at `start` radians and sweeps `sweep` radians; a negative sweep
/// runs clockwise. Segment count scales with the sweep so short slices stay cheap.
pub fn sector(
    center: Vec2,
    radius: f32,
    start: f32,
    sweep: f32,
    color: [f32; 4],
    segments_per_circle: u32,
) -> Vec<Vertex> {
    if sweep == 0.0 || radius <= 0.0 {
        return Vec::new();
    }

    let fraction = (sweep.abs() / (2.0 * PI)).min(1.0);
    let segments = ((segments_per_circle as f32 * fraction).ceil() as u32).max(1);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = start + sweep * (i as f32 / segments as f32);
        let theta2 = start + sweep * ((i + 1) as f32 / segments as f32);

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

/// Generate vertices for a filled rectangle (two triangles)
pub fn rect(bounds: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let [bl, br, tr, tl] = bounds.corners();
    vec![
        Vertex::new(bl.x, bl.y, color),
        Vertex::new(br.x, br.y, color),
        Vertex::new(tr.x, tr.y, color),
        Vertex::new(tr.x, tr.y, color),
        Vertex::new(tl.x, tl.y, color),
        Vertex::new(bl.x, bl.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 10.0, WHITE, 16);
        assert_eq!(verts.len(), 48);
        // Every outer vertex sits on the circle
        for v in verts.iter().skip(1).step_by(3) {
            let r = Vec2::from(v.position).length();
            assert!((r - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_sector_scales_segments() {
        let full = sector(Vec2::ZERO, 10.0, 0.0, 2.0 * PI, WHITE, 100);
        let quarter = sector(Vec2::ZERO, 10.0, 0.0, -PI / 2.0, WHITE, 100);
        assert_eq!(full.len(), 300);
        assert_eq!(quarter.len(), 75);
        assert!(sector(Vec2::ZERO, 10.0, 0.0, 0.0, WHITE, 100).is_empty());
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let verts = rect(&Rect::new(0.0, 0.0, 4.0, 2.0), WHITE);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[2].position, [4.0, 2.0]);
    }
}
