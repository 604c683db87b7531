pub mod app;
pub mod input;
pub mod layout;
pub mod modal;
pub mod modal_layout;
pub mod render;
pub mod text_input;
pub mod theme;
pub mod wrap;

pub use app::run;
