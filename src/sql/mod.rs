//! Safe SQL builder: identifiers are literals, values are parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
