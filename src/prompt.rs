//! Terminal interaction.
//! The question collaborator talks to the user only through [`Prompter`], so
//! answers can be scripted in tests.

use crate::error::Result;
use dialoguer::{Confirm, FuzzySelect, Input, MultiSelect, Password, Select};

/// Check run on typed input; `Err` holds the message shown before re-asking.
pub type Validator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

/// Primitive prompts used to build the answer context.
pub trait Prompter {
    /// Asks for a line of text, re-asking until `validator` accepts it.
    fn input(&self, message: &str, initial: Option<&str>, validator: Validator<'_>)
        -> Result<String>;

    /// Asks for hidden text.
    fn password(&self, message: &str, validator: Validator<'_>) -> Result<String>;

    /// Asks a yes/no question.
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Picks one item, returning its index.
    fn select(&self, message: &str, items: &[&str], default: usize) -> Result<usize>;

    /// Picks one item with type-ahead filtering, returning its index.
    fn fuzzy_select(&self, message: &str, items: &[&str], default: usize) -> Result<usize>;

    /// Picks any number of items, returning their indices.
    fn multi_select(&self, message: &str, items: &[&str], defaults: &[bool])
        -> Result<Vec<usize>>;
}

/// Prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(
        &self,
        message: &str,
        initial: Option<&str>,
        validator: Validator<'_>,
    ) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .validate_with(|value: &String| validator(value.as_str()));
        if let Some(initial) = initial.filter(|initial| !initial.is_empty()) {
            input = input.default(initial.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn password(&self, message: &str, validator: Validator<'_>) -> Result<String> {
        Ok(Password::new()
            .with_prompt(message)
            .allow_empty_password(true)
            .validate_with(|value: &String| validator(value.as_str()))
            .interact()?)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new().with_prompt(message).default(default).interact()?)
    }

    fn select(&self, message: &str, items: &[&str], default: usize) -> Result<usize> {
        Ok(Select::new().with_prompt(message).items(items).default(default).interact()?)
    }

    fn fuzzy_select(&self, message: &str, items: &[&str], default: usize) -> Result<usize> {
        Ok(FuzzySelect::new().with_prompt(message).items(items).default(default).interact()?)
    }

    fn multi_select(
        &self,
        message: &str,
        items: &[&str],
        defaults: &[bool],
    ) -> Result<Vec<usize>> {
        Ok(MultiSelect::new()
            .with_prompt(message)
            .items(items)
            .defaults(defaults)
            .interact()?)
    }
}
