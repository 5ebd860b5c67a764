pub mod bouncer;
pub mod common;
pub mod scene;

pub use bouncer::{Bounce, Bouncer};
pub use common::{Bounds, Pos, Size, Velocity};
pub use scene::{Scene, random_diagonal};
