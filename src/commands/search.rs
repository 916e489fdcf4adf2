//! Search command - styles matching a query

use super::{Context, Result};
use crate::output;
use crate::panel::{FAVORITES_SECTION, MemoryHost, PanelEvent, PanelView};

/// Execute the search command
///
/// Query words are joined with spaces and parsed with the panel's query
/// language.
///
/// # Errors
///
/// Returns an error if the source choice cannot be remembered.
pub fn execute(ctx: &Context<'_>, query: &[String], source: Option<&str>) -> Result<()> {
    let query = query.join(" ");
    let view = render(ctx, &query, source)?;

    if view.sections.is_empty() {
        if !ctx.quiet {
            println!("No styles match '{query}'.");
        }
        return Ok(());
    }

    let total: usize = view
        .sections
        .iter()
        .filter(|s| s.name != FAVORITES_SECTION)
        .map(|s| s.count)
        .sum();
    if !ctx.quiet {
        println!("Found {total} style(s) matching '{query}':");
    }

    for section in view.sections.iter().filter(|s| s.name != FAVORITES_SECTION) {
        if !ctx.quiet {
            println!("{}", output::category_header(&section.name, section.count, false));
        }
        for card in &section.cards {
            println!("{}", output::card_detail(card, ctx.quiet));
        }
    }
    Ok(())
}

fn render(ctx: &Context<'_>, query: &str, source: Option<&str>) -> Result<PanelView> {
    let mut panel = ctx.panel_for_source(MemoryHost::default(), source)?;
    panel.dispatch(PanelEvent::SearchSettled(query.to_string()))?;
    Ok(panel.view())
}
