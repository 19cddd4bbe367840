pub mod app;
pub mod error;
pub mod mortgage;
pub mod render;
