//! Terminal prompts

use dialoguer::{theme::ColorfulTheme, Input};
use dockyard_errors::{Error, GitConfigError};
use dockyard_gitsign::Prompter;

/// Styled prompts for an attended terminal
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&mut self, label: &str) -> Result<String, Error> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| {
                GitConfigError::PromptFailed {
                    prompt: label.to_string(),
                    message: e.to_string(),
                }
                .into()
            })
    }
}
