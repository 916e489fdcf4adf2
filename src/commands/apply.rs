//! Apply command - merge styles into prompt text

use super::{Context, Result, require_styles};
use crate::merge::PromptField;
use crate::output;
use crate::panel::{Conflict, MemoryHost, PanelController, PanelEvent};
use crate::prefs::ApplyMode;

/// What applying a selection produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub prompt: String,
    pub negative: String,
    /// Selection JSON, set in silent mode
    pub selection: Option<String>,
    pub conflicts: Vec<Conflict>,
}

/// Apply styles to prompt text through a panel
///
/// The mode is used for this run only. Applied styles join the tab's recent
/// list.
///
/// # Errors
///
/// Returns `StyleGridError::InvalidInput` for unknown style names, or a
/// preference error if the recent list cannot be saved.
pub fn apply(ctx: &Context<'_>, names: &[String], prompt: &str, negative: &str, mode: ApplyMode) -> Result<Applied> {
    let mut panel = ctx.panel(MemoryHost::new(prompt, negative)).with_apply_mode(mode);
    require_styles(&panel, names)?;

    for name in names {
        if !panel.state().selected.contains(name) {
            panel.dispatch(PanelEvent::ToggleStyle(name.clone()))?;
        }
    }
    apply_selection(panel)
}

/// Apply whatever is selected on a panel and collect the host's fields
///
/// # Errors
///
/// Returns a preference error if the recent list cannot be saved.
pub fn apply_selection(mut panel: PanelController<'_, MemoryHost>) -> Result<Applied> {
    let conflicts = panel.view().conflicts;
    panel.dispatch(PanelEvent::Apply)?;

    let host = panel.into_host();
    Ok(Applied {
        prompt: host.field(PromptField::Prompt).unwrap_or_default().to_string(),
        negative: host.field(PromptField::Negative).unwrap_or_default().to_string(),
        selection: host.selection().map(str::to_string),
        conflicts,
    })
}

/// Execute the apply command
///
/// # Errors
///
/// Returns an error if a style is unknown or preferences cannot be saved.
pub fn execute(
    ctx: &Context<'_>,
    names: &[String],
    prompt: &str,
    negative: &str,
    mode: ApplyMode,
    copy: bool,
) -> Result<()> {
    let applied = apply(ctx, names, prompt, negative, mode)?;
    print_applied(&applied, ctx.quiet);
    if copy {
        copy_to_clipboard(&applied.prompt, ctx.quiet);
    }
    Ok(())
}

/// Print the result of an apply, shared with presets and the picker
pub fn print_applied(applied: &Applied, quiet: bool) {
    if !quiet {
        for conflict in &applied.conflicts {
            eprintln!("{}", output::conflict_line(conflict));
        }
    }

    if let Some(selection) = &applied.selection {
        println!("{selection}");
        return;
    }

    if quiet {
        println!("{}", applied.prompt);
        println!("{}", applied.negative);
    } else {
        println!("Prompt: {}", applied.prompt);
        if !applied.negative.is_empty() {
            println!("Negative prompt: {}", applied.negative);
        }
    }
}

/// Put text on the system clipboard, warning when it is unavailable
pub fn copy_to_clipboard(text: &str, quiet: bool) {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match result {
        Ok(()) => {
            if !quiet {
                println!("Copied prompt to clipboard.");
            }
        }
        Err(e) => {
            tracing::warn!("Clipboard unavailable: {e}");
            if !quiet {
                eprintln!("Clipboard unavailable: {e}");
            }
        }
    }
}
