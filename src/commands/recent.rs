//! Recent command - recently applied styles

use super::{Context, Result};

/// Execute the recent command
///
/// # Errors
///
/// Returns an error if the recent list cannot be cleared.
pub fn execute(ctx: &Context<'_>, clear: bool) -> Result<()> {
    if clear {
        ctx.prefs.set_recent(ctx.tab, &[])?;
        if !ctx.quiet {
            println!("Cleared recent styles for {}.", ctx.tab);
        }
        return Ok(());
    }

    let recent = ctx.prefs.recent(ctx.tab);
    if recent.is_empty() {
        if !ctx.quiet {
            println!("No recently applied styles for {}.", ctx.tab);
        }
        return Ok(());
    }

    if !ctx.quiet {
        println!("Recently applied ({}):", ctx.tab);
    }
    for (i, name) in recent.iter().enumerate() {
        if ctx.quiet {
            println!("{name}");
        } else {
            println!("  {:>2}. {name}", i + 1);
        }
    }
    Ok(())
}
