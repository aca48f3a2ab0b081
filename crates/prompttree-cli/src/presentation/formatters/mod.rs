pub mod color;
pub mod text;
pub mod time;
