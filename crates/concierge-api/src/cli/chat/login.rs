//! Login prompts for room number and guest name.

use anyhow::Result;
use dialoguer::Input;

/// Reject blank credential input.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}

/// Use `given` when present, otherwise prompt until something non-blank is entered.
pub fn prompt_field(label: &str, given: Option<String>) -> Result<String> {
    if let Some(value) = given.filter(|v| !v.trim().is_empty()) {
        return Ok(value);
    }
    let label_owned = label.to_string();
    let value = Input::<String>::new()
        .with_prompt(label)
        .validate_with(move |input: &String| require_non_empty(&label_owned, input))
        .interact_text()?;
    Ok(value)
}

/// Collect room number and guest name, prompting for whichever is missing.
pub fn collect_credentials(room: Option<String>, name: Option<String>) -> Result<(String, String)> {
    let room = prompt_field("Room Number", room)?;
    let name = prompt_field("Surname", name)?;
    Ok((room, name))
}
