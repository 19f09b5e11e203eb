mod generator;
mod sleep;

pub use generator::*;
pub use sleep::*;
