//! Interactive prompts backed by inquire.

use inquire::{Confirm, InquireError, Select};
use keel_core::{Error, Prompter, Result};

/// Prompts on the terminal. Esc dismisses, Ctrl-C is an error.
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        match Confirm::new(message).prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled) => Ok(false),
            Err(e) => Err(Error::Prompt(e.to_string())),
        }
    }

    fn select(&self, message: &str, options: &[String]) -> Result<Option<String>> {
        match Select::new(message, options.to_vec()).prompt() {
            Ok(choice) => Ok(Some(choice)),
            Err(InquireError::OperationCanceled) => Ok(None),
            Err(e) => Err(Error::Prompt(e.to_string())),
        }
    }
}
