pub mod board;
pub mod config;
pub mod ids;
pub mod state;
pub mod task;

pub use board::*;
pub use config::*;
pub use ids::*;
pub use state::*;
pub use task::*;
