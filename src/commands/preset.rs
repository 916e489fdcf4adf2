//! Preset command - named, saved selections

use super::apply::{apply_selection, copy_to_clipboard, print_applied};
use super::{Context, Result, require_styles};
use crate::StyleGridError;
use crate::cli::{PresetCommands, PromptArgs};
use crate::output;
use crate::panel::{MemoryHost, PanelEvent};
use crate::prefs::ApplyMode;

/// Execute a preset subcommand
///
/// # Errors
///
/// Returns an error if the preset is unknown, a style is unknown, or the
/// preference store fails.
pub fn execute(ctx: &Context<'_>, command: &PresetCommands) -> Result<()> {
    match command {
        PresetCommands::Save { name, styles } => save(ctx, name, styles),
        PresetCommands::List => {
            list(ctx);
            Ok(())
        }
        PresetCommands::Show { name } => show(ctx, name),
        PresetCommands::Delete { name } => delete(ctx, name),
        PresetCommands::Apply { name, prompt_args, copy } => apply(ctx, name, prompt_args, *copy),
    }
}

fn save(ctx: &Context<'_>, name: &str, styles: &[String]) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StyleGridError::InvalidInput("Preset name cannot be empty".into()));
    }

    let mut panel = ctx.panel(MemoryHost::default()).with_apply_mode(ApplyMode::Prompt);
    require_styles(&panel, styles)?;
    for style in styles {
        if !panel.state().selected.contains(style) {
            panel.dispatch(PanelEvent::ToggleStyle(style.clone()))?;
        }
    }
    panel.dispatch(PanelEvent::SavePreset(name.to_string()))?;

    if !ctx.quiet {
        println!("Saved preset '{name}' with {} style(s).", panel.state().selected.len());
    }
    Ok(())
}

fn list(ctx: &Context<'_>) {
    let presets = ctx.prefs.presets(ctx.tab);
    if presets.is_empty() {
        if !ctx.quiet {
            println!("No presets for {}.", ctx.tab);
        }
        return;
    }
    if !ctx.quiet {
        println!("Presets for {}:", ctx.tab);
    }
    for preset in &presets {
        println!("{}", output::preset_line(preset, ctx.quiet));
    }
}

fn show(ctx: &Context<'_>, name: &str) -> Result<()> {
    let preset = ctx
        .prefs
        .preset(ctx.tab, name)
        .ok_or_else(|| not_found(name))?;

    if !ctx.quiet {
        println!("{}", output::preset_line(&preset, false));
    }
    for style in &preset.styles {
        if ctx.quiet {
            println!("{style}");
        } else {
            println!("    {style}");
        }
    }
    Ok(())
}

fn delete(ctx: &Context<'_>, name: &str) -> Result<()> {
    if !ctx.prefs.delete_preset(ctx.tab, name)? {
        return Err(not_found(name));
    }
    if !ctx.quiet {
        println!("Deleted preset '{name}'.");
    }
    Ok(())
}

fn apply(ctx: &Context<'_>, name: &str, prompt_args: &PromptArgs, copy: bool) -> Result<()> {
    let host = MemoryHost::new(&prompt_args.prompt, &prompt_args.negative);
    let mut panel = ctx.panel(host).with_apply_mode(ApplyMode::Prompt);
    if !panel.load_preset(name)? {
        return Err(not_found(name));
    }

    let applied = apply_selection(panel)?;
    print_applied(&applied, ctx.quiet);
    if copy {
        copy_to_clipboard(&applied.prompt, ctx.quiet);
    }
    Ok(())
}

fn not_found(name: &str) -> StyleGridError {
    StyleGridError::InvalidInput(format!("Preset '{name}' not found"))
}
