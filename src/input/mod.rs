mod handler;
mod keymap;

pub use handler::{Command, Direction};
pub use keymap::{handle_key_event, handle_prompt_key};
