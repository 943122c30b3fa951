pub use apple_mesh::apple_mesh;
pub use grid_mesh::{border_mesh, grid_mesh};
pub use particles::Burst;
pub use snake_mesh::snake_mesh;

mod apple_mesh;
mod grid_mesh;
mod particles;
mod snake_mesh;
