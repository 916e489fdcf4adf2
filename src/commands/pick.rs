//! Pick command - interactive panel in the terminal
//!
//! The picker drives a [`PanelController`] from a menu loop. Every action
//! becomes a panel event, so the interactive session follows exactly the
//! rules of the panel: apply modes, favorites first, recent list, presets.
//!
//! Input goes through the [`PickInput`] trait; [`DialoguerInput`] is the
//! terminal implementation.

use super::apply::{Applied, apply_selection, print_applied};
use super::{Context, Result};
use crate::output;
use crate::panel::{MemoryHost, PanelController, PanelEvent, PanelView};
use crate::prefs::ApplyMode;
use clap::ValueEnum;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};
use std::fmt;
use std::time::Instant;

/// Interactive prompts used by the picker
///
/// `Ok(None)` means the user cancelled the prompt.
pub trait PickInput {
    fn prompt_text(&self, prompt: &str, allow_empty: bool) -> Result<Option<String>>;

    fn prompt_select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>>;

    fn prompt_multi(&self, prompt: &str, items: &[String], checked: &[bool]) -> Result<Option<Vec<usize>>>;
}

/// Terminal prompts using dialoguer
pub struct DialoguerInput {
    theme: ColorfulTheme,
}

impl DialoguerInput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl PickInput for DialoguerInput {
    fn prompt_text(&self, prompt: &str, allow_empty: bool) -> Result<Option<String>> {
        let text = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()?;
        Ok(Some(text))
    }

    fn prompt_select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()?)
    }

    fn prompt_multi(&self, prompt: &str, items: &[String], checked: &[bool]) -> Result<Option<Vec<usize>>> {
        Ok(MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .defaults(checked)
            .interact_opt()?)
    }
}

/// Menu entries of the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Select,
    Favorite,
    Source,
    Mode,
    LoadPreset,
    SavePreset,
    Clear,
    Apply,
    Cancel,
}

impl Action {
    const ALL: [Self; 10] = [
        Self::Search,
        Self::Select,
        Self::Favorite,
        Self::Source,
        Self::Mode,
        Self::LoadPreset,
        Self::SavePreset,
        Self::Clear,
        Self::Apply,
        Self::Cancel,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "Search",
            Self::Select => "Select styles",
            Self::Favorite => "Toggle favorites",
            Self::Source => "Choose source",
            Self::Mode => "Change apply mode",
            Self::LoadPreset => "Load preset",
            Self::SavePreset => "Save selection as preset",
            Self::Clear => "Clear selection",
            Self::Apply => "Apply",
            Self::Cancel => "Cancel",
        })
    }
}

/// Execute the pick command in the terminal
///
/// # Errors
///
/// Returns an error if a prompt fails or preferences cannot be saved.
pub fn execute(ctx: &Context<'_>, prompt: &str, negative: &str, mode: Option<ApplyMode>) -> Result<()> {
    match run(ctx, &DialoguerInput::new(), prompt, negative, mode)? {
        Some(applied) => print_applied(&applied, ctx.quiet),
        None => {
            if !ctx.quiet {
                println!("Cancelled.");
            }
        }
    }
    Ok(())
}

/// Run a picker session, returning the applied result unless cancelled
///
/// # Errors
///
/// Returns an error if a prompt fails or preferences cannot be saved.
pub fn run<I: PickInput>(
    ctx: &Context<'_>,
    input: &I,
    prompt: &str,
    negative: &str,
    mode: Option<ApplyMode>,
) -> Result<Option<Applied>> {
    let mut panel = ctx.panel(MemoryHost::new(prompt, negative));
    if let Some(mode) = mode {
        panel = panel.with_apply_mode(mode);
    }
    panel.dispatch(PanelEvent::Open)?;

    let menu: Vec<String> = Action::ALL.iter().map(ToString::to_string).collect();
    loop {
        let view = panel.view();
        if !ctx.quiet {
            print_status(&view);
        }

        let Some(choice) = input.prompt_select("Style Grid", &menu)? else {
            panel.dispatch(PanelEvent::Escape)?;
            return Ok(None);
        };
        let Some(&action) = Action::ALL.get(choice) else {
            continue;
        };

        match action {
            Action::Search => {
                if let Some(query) = input.prompt_text("Search", true)? {
                    panel.type_search(&query, Instant::now())?;
                    panel.settle_search()?;
                }
            }
            Action::Select => choose_styles(&mut panel, input, &view)?,
            Action::Favorite => choose_favorites(&mut panel, input, &view)?,
            Action::Source => {
                let mut sources = vec![ctx.settings.all_sources_label.clone()];
                sources.extend(view.sources.iter().cloned());
                if let Some(i) = input.prompt_select("Source", &sources)?
                    && let Some(source) = sources.get(i)
                {
                    panel.dispatch(PanelEvent::SelectSource(source.clone()))?;
                }
            }
            Action::Mode => {
                let modes = ApplyMode::value_variants();
                let labels: Vec<String> = modes.iter().map(ToString::to_string).collect();
                if let Some(i) = input.prompt_select("Apply mode", &labels)?
                    && let Some(&mode) = modes.get(i)
                {
                    panel.dispatch(PanelEvent::SetApplyMode(mode))?;
                }
            }
            Action::LoadPreset => {
                let names: Vec<String> = ctx.prefs.presets(ctx.tab).into_iter().map(|p| p.name).collect();
                if names.is_empty() {
                    if !ctx.quiet {
                        println!("No presets saved for {}.", ctx.tab);
                    }
                } else if let Some(i) = input.prompt_select("Preset", &names)?
                    && let Some(name) = names.get(i)
                {
                    panel.load_preset(name)?;
                }
            }
            Action::SavePreset => {
                if let Some(name) = input.prompt_text("Preset name", false)? {
                    panel.dispatch(PanelEvent::SavePreset(name))?;
                }
            }
            Action::Clear => panel.dispatch(PanelEvent::ClearAll)?,
            Action::Apply => {
                if view.selected_count == 0 {
                    if !ctx.quiet {
                        println!("Nothing selected.");
                    }
                    continue;
                }
                return apply_selection(panel).map(Some);
            }
            Action::Cancel => {
                panel.dispatch(PanelEvent::Escape)?;
                return Ok(None);
            }
        }
    }
}

fn card_items(view: &PanelView) -> Vec<(String, String, bool, bool)> {
    view.sections
        .iter()
        .filter(|s| s.name != crate::panel::FAVORITES_SECTION)
        .flat_map(|section| {
            section.cards.iter().map(move |card| {
                (
                    card.name.clone(),
                    format!("{} / {}", section.name, card.label),
                    card.selected,
                    card.favorite,
                )
            })
        })
        .collect()
}

fn choose_styles<I: PickInput>(
    panel: &mut PanelController<'_, MemoryHost>,
    input: &I,
    view: &PanelView,
) -> Result<()> {
    let items = card_items(view);
    let labels: Vec<String> = items.iter().map(|(_, label, _, _)| label.clone()).collect();
    let checked: Vec<bool> = items.iter().map(|&(_, _, selected, _)| selected).collect();

    if let Some(chosen) = input.prompt_multi("Styles", &labels, &checked)? {
        for (i, (name, _, was, _)) in items.iter().enumerate() {
            if chosen.contains(&i) != *was {
                panel.dispatch(PanelEvent::ToggleStyle(name.clone()))?;
            }
        }
    }
    Ok(())
}

fn choose_favorites<I: PickInput>(
    panel: &mut PanelController<'_, MemoryHost>,
    input: &I,
    view: &PanelView,
) -> Result<()> {
    let items = card_items(view);
    let labels: Vec<String> = items.iter().map(|(_, label, _, _)| label.clone()).collect();
    let checked: Vec<bool> = items.iter().map(|&(_, _, _, favorite)| favorite).collect();

    if let Some(chosen) = input.prompt_multi("Favorites", &labels, &checked)? {
        for (i, (name, _, _, was)) in items.iter().enumerate() {
            if chosen.contains(&i) != *was {
                panel.dispatch(PanelEvent::ToggleFavorite(name.clone()))?;
            }
        }
    }
    Ok(())
}

fn print_status(view: &PanelView) {
    let shown: usize = view
        .sections
        .iter()
        .filter(|s| s.name != crate::panel::FAVORITES_SECTION)
        .map(|s| s.count)
        .sum();
    let search = if view.search.is_empty() {
        String::new()
    } else {
        format!(", search '{}'", view.search)
    };
    println!(
        "{shown} style(s) in {}{search}, mode {}, {} selected",
        view.source, view.apply_mode, view.selected_count
    );
    if !view.chips.is_empty() {
        let labels: Vec<&str> = view.chips.iter().map(|c| c.label.as_str()).collect();
        println!("  Selected: {}", labels.join(", "));
    }
    for conflict in &view.conflicts {
        println!("  {}", output::conflict_line(conflict));
    }
}
