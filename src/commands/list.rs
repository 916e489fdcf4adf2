//! List command - categories in display order with their styles

use super::{Context, Result};
use crate::output;
use crate::panel::{MemoryHost, PanelEvent, PanelView};
use crate::prefs::SortMode;

/// Execute the list command
///
/// # Errors
///
/// Returns an error if the source or sort choice cannot be remembered.
pub fn execute(ctx: &Context<'_>, source: Option<&str>, sort: Option<SortMode>) -> Result<()> {
    let view = render(ctx, source, sort)?;

    if view.sections.is_empty() {
        if !ctx.quiet {
            println!("No styles found.");
        }
        return Ok(());
    }

    if !ctx.quiet {
        println!("Styles in {} ({} sort):", view.source, view.sort_mode);
    }
    for section in &view.sections {
        if !ctx.quiet {
            println!("{}", output::category_header(&section.name, section.count, false));
        }
        for card in &section.cards {
            println!("{}", output::card_line(card, ctx.quiet));
        }
    }
    Ok(())
}

fn render(ctx: &Context<'_>, source: Option<&str>, sort: Option<SortMode>) -> Result<PanelView> {
    let mut panel = ctx.panel_for_source(MemoryHost::default(), source)?;
    if let Some(sort) = sort {
        panel.dispatch(PanelEvent::SetSortMode(sort))?;
    }
    Ok(panel.view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use crate::prefs::Tab;
    use crate::testing::TestPrefs;

    fn titles(view: &PanelView) -> Vec<&str> {
        view.sections.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_lists_all_sections() {
        let prefs = TestPrefs::new();
        let view = render(&context(&prefs), None, None).unwrap();
        assert_eq!(titles(&view), vec!["STYLE", "SCENE", "OTHER"]);
    }

    #[test]
    fn test_source_is_remembered() {
        let prefs = TestPrefs::new();
        let ctx = context(&prefs);
        let view = render(&ctx, Some("places.csv"), None).unwrap();
        assert_eq!(titles(&view), vec!["SCENE"]);
        assert_eq!(prefs.source(Tab::Txt2img).as_deref(), Some("places.csv"));

        let view = render(&ctx, None, None).unwrap();
        assert_eq!(titles(&view), vec!["SCENE"]);
    }

    #[test]
    fn test_sort_is_remembered() {
        let prefs = TestPrefs::new();
        render(&context(&prefs), None, Some(SortMode::Source)).unwrap();
        assert_eq!(prefs.sort_mode(Tab::Txt2img), SortMode::Source);
    }

    #[test]
    fn test_execute_prints() {
        let prefs = TestPrefs::new();
        assert!(execute(&context(&prefs), None, None).is_ok());
    }
}
