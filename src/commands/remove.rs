//! Remove command - take literal style text back out of prompt text

use super::{Context, Result, require_styles};
use crate::merge::{PromptField, remove_fragment, uses_placeholder};
use crate::panel::MemoryHost;

/// Remove the literal fragments of styles from both prompt fields
///
/// Placeholder fragments wrapped the prompt when applied and cannot be
/// taken back; they are skipped with a warning.
///
/// # Errors
///
/// Returns `StyleGridError::InvalidInput` for unknown style names.
pub fn remove(ctx: &Context<'_>, names: &[String], prompt: &str, negative: &str) -> Result<(String, String)> {
    let panel = ctx.panel(MemoryHost::default());
    require_styles(&panel, names)?;

    let mut prompt = prompt.to_string();
    let mut negative = negative.to_string();

    for style in names.iter().filter_map(|name| panel.state().resolve(name)) {
        for field in PromptField::ALL {
            let Some(fragment) = style.fragment(field) else {
                continue;
            };
            if uses_placeholder(fragment) {
                tracing::warn!("Cannot remove placeholder {field} of '{}'", style.name);
                continue;
            }
            let text = match field {
                PromptField::Prompt => &mut prompt,
                PromptField::Negative => &mut negative,
            };
            *text = remove_fragment(text, fragment);
        }
    }
    Ok((prompt, negative))
}

/// Execute the remove command
///
/// # Errors
///
/// Returns an error if a style is unknown.
pub fn execute(ctx: &Context<'_>, names: &[String], prompt: &str, negative: &str) -> Result<()> {
    let (prompt, negative) = remove(ctx, names, prompt, negative)?;
    if ctx.quiet {
        println!("{prompt}");
        println!("{negative}");
    } else {
        println!("Prompt: {prompt}");
        if !negative.is_empty() {
            println!("Negative prompt: {negative}");
        }
    }
    Ok(())
}
