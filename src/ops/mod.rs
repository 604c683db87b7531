pub mod board_ops;
pub mod drag;
pub mod intent;
pub mod task_ops;
pub mod validate;
