mod bit_layout;
mod extract;
mod field;

pub use bit_layout::*;
pub use extract::*;
pub use field::*;
