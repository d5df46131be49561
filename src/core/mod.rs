pub mod config;
pub mod constants;
pub mod effects;
pub mod fonts;
pub mod grid;
pub mod noise;
pub mod proximity;

pub use self::config::*;
pub use self::effects::*;
pub use self::fonts::*;
pub use self::grid::*;
pub use self::noise::*;
pub use self::proximity::*;
