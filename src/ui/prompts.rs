use anyhow::{Context, Result};
use dialoguer::Select;
use is_terminal::IsTerminal;
use std::io::BufRead;

/// True when stdin is attached to a terminal
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Interactive confirmation prompt using arrow-key navigable selection
///
/// # Arguments
/// * `prompt` - The question to ask the user
/// * `default_yes` - Whether "Yes" should be the default selection (index 0)
///
/// # Returns
/// * `Ok(true)` if user selects "Yes"
/// * `Ok(false)` if user selects "No"
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}

/// Confirms a destructive action. `force` skips the prompt; without a terminal `force` is required.
pub fn confirm_destructive(prompt: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    if !is_interactive() {
        anyhow::bail!("Refusing to continue without confirmation. Pass --force in non-interactive use.");
    }
    prompt_confirmation(prompt, false)
}

/// Reads a secret without echo. Without a terminal the first line of stdin is used.
pub fn prompt_secret(label: &str) -> Result<String> {
    let secret = if is_interactive() {
        rpassword::prompt_password(format!("{}: ", label))
            .with_context(|| format!("Failed to read {}", label))?
    } else {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .with_context(|| format!("Failed to read {} from stdin", label))?;
        line
    };

    let secret = secret.trim().to_string();
    if secret.is_empty() {
        anyhow::bail!("{} must not be empty", label);
    }
    Ok(secret)
}
