mod pagination;
mod sequence;

pub use pagination::*;
pub use sequence::*;
