//! Stateless geometry kernel: planes, bounding volumes, half-space and
//! frustum containment tests, and screen-to-view unprojection.

pub mod plane;
pub mod shapes;
pub mod unproject;

pub use plane::Plane;
pub use shapes::{Cone, Frustum, Sphere};
pub use unproject::{clip_to_view, screen_to_clip, screen_to_view};
