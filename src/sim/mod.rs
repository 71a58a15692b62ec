//! Training simulation module
//!
//! All gameplay logic lives here. No rendering, audio or platform dependencies:
//! - Timestamps come in as session-clock milliseconds
//! - Randomness comes in as an `Rng`
//! - Entity collections keep spawn order (newest last)

pub mod clock;
pub mod collision;
pub mod ripple;
pub mod spawn;
pub mod state;
pub mod target;
pub mod tick;

pub use clock::SessionClock;
pub use collision::{point_in_circle, resolve_click};
pub use ripple::{Ripple, RippleKind};
pub use spawn::{SpawnDescriptor, spawn_descriptor, spawn_radius, spawn_speed};
pub use state::{Bounds, SessionEvent, SessionPhase, SessionState};
pub use target::Target;
pub use tick::tick;
