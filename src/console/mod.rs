//! Terminal front-end: input, command parsing and text rendering.

mod command;
mod input;
mod view;

pub use command::{Command, HELP, is_confirmation};
pub use input::spawn_line_reader;
pub use view::{render_board, render_celebration, render_reveal, render_shuffle, render_status};
