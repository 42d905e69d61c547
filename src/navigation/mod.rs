//! Navigation module - the walkable surface, placement guard and agents.
//!
//! Path search is an external concern; agents here only steer in a straight
//! line and refuse to leave the surface.

mod agent;
mod guard;
mod plugin;
mod surface;
mod systems;

pub use agent::{face_towards, NavAgent};
pub use guard::{
    snap_to_surface, try_attach, Attachment, NavigationSettings, Placement, PlacementGuard,
    PlacementStep,
};
pub use plugin::NavigationPlugin;
pub use surface::{GroundProbe, NavGrid, NavSurface, NoGround, RapierGroundProbe};
pub use systems::{drive_nav_agents, place_new_agents, retry_agent_placement, NeedsPlacement};
