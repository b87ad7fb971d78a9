pub mod constants;
pub mod error;
pub mod field;
pub mod params;
pub mod particle;
pub mod pulse;
pub mod state;
pub mod surface;

pub use error::*;
pub use field::*;
pub use params::*;
pub use particle::*;
pub use pulse::*;
pub use state::*;
pub use surface::*;
