mod detection;
mod marker;
mod result;

pub use detection::*;
pub use marker::*;
pub use result::*;
