//=========================================================================
// Procedural Content
//=========================================================================
//
// Seeded generators for point clouds, scattered props and ghost paths.
//
//=========================================================================

//=== Module Declarations =================================================

mod galaxy;
mod ghosts;
mod scatter;

//=== Public API ==========================================================

pub use galaxy::{generate_galaxy, GalaxyCloud, GalaxyParameters};
pub use ghosts::ghost_positions;
pub use scatter::{place_graves, scatter_donuts, scatter_particles};
