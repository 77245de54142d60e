pub mod buffer;
pub mod window;
