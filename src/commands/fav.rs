//! Fav command - manage favorite styles

use super::{Context, Result, require_styles};
use crate::cli::FavCommands;
use crate::panel::{MemoryHost, PanelEvent};

/// Execute a favorites subcommand
///
/// # Errors
///
/// Returns an error if a style to add is unknown or the favorites cannot
/// be saved.
pub fn execute(ctx: &Context<'_>, command: &FavCommands) -> Result<()> {
    match command {
        FavCommands::Add { names } => set_favorite(ctx, names, true),
        FavCommands::Remove { names } => set_favorite(ctx, names, false),
        FavCommands::List => {
            list(ctx);
            Ok(())
        }
    }
}

fn set_favorite(ctx: &Context<'_>, names: &[String], favorite: bool) -> Result<()> {
    let mut panel = ctx.panel(MemoryHost::default());
    if favorite {
        require_styles(&panel, names)?;
    }

    let mut changed = 0;
    for name in names {
        if panel.state().favorites.contains(name) != favorite {
            panel.dispatch(PanelEvent::ToggleFavorite(name.clone()))?;
            changed += 1;
        }
    }

    if !ctx.quiet {
        let verb = if favorite { "Added" } else { "Removed" };
        println!("{verb} {changed} favorite(s).");
    }
    Ok(())
}

fn list(ctx: &Context<'_>) {
    let favorites = ctx.prefs.favorites(ctx.tab);
    if favorites.is_empty() {
        if !ctx.quiet {
            println!("No favorites for {}.", ctx.tab);
        }
        return;
    }
    if !ctx.quiet {
        println!("Favorites for {}:", ctx.tab);
    }
    for name in favorites {
        if ctx.quiet {
            println!("{name}");
        } else {
            println!("  {name}");
        }
    }
}
