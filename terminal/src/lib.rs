pub mod app;
pub mod render;
pub mod replay;
pub mod views;
