//! Output formatting for CLI display
//!
//! Category headers take the category's panel color; in quiet mode every
//! helper prints bare names suitable for piping.

use crate::panel::{CardView, Conflict, category_color};
use crate::prefs::Preset;
use colored::Colorize;

/// Parse a `#rrggbb` color
#[must_use]
pub fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Format a category header with its style count
#[must_use]
pub fn category_header(name: &str, count: usize, quiet: bool) -> String {
    if quiet {
        return name.to_string();
    }
    let title = match hex_rgb(category_color(name)) {
        Some((r, g, b)) => name.truecolor(r, g, b).bold().to_string(),
        None => name.bold().to_string(),
    };
    format!("{title} ({count})")
}

/// Format a card as one line: favorite star, label, raw name, source
#[must_use]
pub fn card_line(card: &CardView, quiet: bool) -> String {
    if quiet {
        return card.name.clone();
    }
    let star = if card.favorite { "★ ".yellow().to_string() } else { "  ".to_string() };
    let label = if card.selected { card.label.green().bold().to_string() } else { card.label.clone() };
    let source = card
        .source
        .as_deref()
        .map(|s| format!(" [{s}]").dimmed().to_string())
        .unwrap_or_default();
    format!("  {star}{label} {}{source}", format!("({})", card.name).dimmed())
}

/// Format a card with its prompt fragments, for search results
#[must_use]
pub fn card_detail(card: &CardView, quiet: bool) -> String {
    if quiet {
        return card.name.clone();
    }
    let mut out = format!("  {} {}", card.name.cyan(), format!("[{}]", card.category).dimmed());
    if let Some(prompt) = card.prompt.as_deref().filter(|p| !p.is_empty()) {
        out.push_str(&format!("\n      + {prompt}"));
    }
    if let Some(negative) = card.negative_prompt.as_deref().filter(|n| !n.is_empty()) {
        out.push_str(&format!("\n      - {}", negative.red()));
    }
    out
}

/// Format a preset with its style count
#[must_use]
pub fn preset_line(preset: &Preset, quiet: bool) -> String {
    if quiet {
        return preset.name.clone();
    }
    let created = preset
        .created()
        .map(|t| format!(", saved {}", t.format("%Y-%m-%d %H:%M")))
        .unwrap_or_default();
    format!("  {} ({} style(s){created})", preset.name.green(), preset.styles.len())
}

/// Format a conflict warning
#[must_use]
pub fn conflict_line(conflict: &Conflict) -> String {
    format!("{} {conflict}", "warning:".yellow().bold())
}
