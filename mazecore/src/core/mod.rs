pub mod dims;

pub use dims::*;
