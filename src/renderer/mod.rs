//! WebGPU rendering module
//!
//! Paddles and ball are flat-coloured triangles. Text (score, banner,
//! messages) is left to the page overlay.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use crate::scene::Scene;

/// Triangles for a scene, in game coordinates
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    match scene {
        Scene::Playing(table) => {
            let mut vertices = shapes::outlined_rect(&table.left_paddle);
            vertices.extend(shapes::outlined_rect(&table.right_paddle));
            vertices.extend(shapes::outlined_circle(&table.ball));
            vertices
        }
        Scene::Menu { .. } | Scene::GameOver { .. } => Vec::new(),
    }
}
