//! Application state module

mod app_state;
mod forms;
mod screen_buffer;

pub use app_state::*;
pub use forms::*;
pub use screen_buffer::*;
