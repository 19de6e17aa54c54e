//! Trait abstractions for user interaction.

use crate::Result;

/// Trait for asking the user to make a decision.
///
/// Both calls block until the user answers. There is no timeout and no
/// default answer.
#[allow(clippy::missing_errors_doc)]
pub trait Prompter {
    /// Ask a yes/no question. Dismissing the prompt answers "no".
    fn confirm(&self, message: &str) -> Result<bool>;

    /// Ask the user to pick one of `options`.
    ///
    /// Returns the chosen option, or `None` if the prompt was dismissed.
    fn select(&self, message: &str, options: &[String]) -> Result<Option<String>>;
}
