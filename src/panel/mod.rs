//! The style selection panel
//!
//! One panel exists per tab context. Its state changes only through
//! [`reduce`], which returns the new state together with a list of
//! [`Effect`]s; rendering is a pure function of state ([`view`]). The
//! [`PanelController`] ties the two to a [`PromptHost`] and the
//! [`Preferences`](crate::prefs::Preferences) store.
//!
//! ```text
//! ┌──────────────┐  PanelEvent   ┌──────────┐  Effect   ┌────────────┐
//! │ front end    │──────────────►│ reduce   │──────────►│ PromptHost │
//! │ (pick, CLI)  │               │          │           │ Preferences│
//! └──────────────┘               └────┬─────┘           └────────────┘
//!         ▲            PanelView      │ PanelState
//!         └──────────── view ◄────────┘
//! ```

mod conflicts;
mod controller;
mod debounce;
mod event;
mod host;
mod reducer;
mod state;
mod view;

pub use conflicts::{Conflict, detect as detect_conflicts};
pub use controller::PanelController;
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use event::{Effect, PanelEvent, PrefChange, PromptFields, Transition};
pub use host::{MemoryHost, Notification, PromptHost};
pub use reducer::reduce;
pub use state::{CatalogData, PanelSettings, PanelState};
pub use view::{
    CardView, Chip, FAVORITES_SECTION, PanelView, Section, SectionView, category_color, section_names, view,
    visible_in, visible_sections,
};
