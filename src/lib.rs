mod error;
mod limits;
mod source;
mod tag;

pub mod snbt;

pub use error::*;
pub use limits::*;
pub use source::*;
pub use tag::*;
