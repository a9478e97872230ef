pub mod image;
pub mod wire;

pub use image::*;
pub use wire::*;
