pub mod browse;
pub mod commands;
pub mod render;
