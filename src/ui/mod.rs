pub mod prompts;

pub use prompts::{confirm_destructive, is_interactive, prompt_confirmation, prompt_secret};
