pub mod app;
pub mod input;
pub mod picker;
pub mod render;
pub mod theme;

pub use app::run;
