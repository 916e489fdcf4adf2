//! The host application the panel writes prompt text into
//!
//! A host owns the prompt fields, the hidden selection field used by silent
//! mode, and the style data transport. Every programmatic write must raise
//! the host's own change notification so its reactive layer sees it.

use super::event::PromptFields;
use super::state::CatalogData;
use crate::loader::{StyleSet, category_order_from_json};
use crate::merge::PromptField;
use std::collections::HashMap;

/// Output contract between a panel controller and its host
pub trait PromptHost {
    /// Current text of a field, `None` when the host has no such field
    fn read(&self, field: PromptField) -> Option<String>;

    /// Set a field and raise its change notification
    fn write(&mut self, field: PromptField, value: &str);

    /// Store the selection JSON for deferred application and notify
    fn write_selection(&mut self, json: &str);

    /// Selection size changed, for badges on the trigger control
    fn selection_count(&mut self, _count: usize) {}

    /// Fresh style data, `None` when the host cannot reload
    fn reload(&mut self) -> Option<CatalogData> {
        None
    }

    /// Snapshot both prompt fields
    fn snapshot(&self) -> PromptFields {
        PromptFields {
            prompt: self.read(PromptField::Prompt),
            negative: self.read(PromptField::Negative),
        }
    }
}

/// A change notification raised by [`MemoryHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Field(PromptField),
    Selection,
}

/// In-memory host recording every notification
///
/// Backs the command line front end and tests. Style data is held as the
/// JSON data transport documents and parsed on reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    fields: HashMap<PromptField, String>,
    selection: Option<String>,
    styles_json: Option<String>,
    order_json: Option<String>,
    notifications: Vec<Notification>,
    count: usize,
}

impl MemoryHost {
    /// Host with both prompt fields present
    #[must_use]
    pub fn new(prompt: impl Into<String>, negative: impl Into<String>) -> Self {
        Self::default()
            .with_field(PromptField::Prompt, prompt)
            .with_field(PromptField::Negative, negative)
    }

    #[must_use]
    pub fn with_field(mut self, field: PromptField, text: impl Into<String>) -> Self {
        self.fields.insert(field, text.into());
        self
    }

    /// Provide data transport documents served on reload
    #[must_use]
    pub fn with_data(mut self, styles_json: impl Into<String>, order_json: impl Into<String>) -> Self {
        self.styles_json = Some(styles_json.into());
        self.order_json = Some(order_json.into());
        self
    }

    /// Replace the styles document, as an external edit would
    pub fn set_styles_json(&mut self, styles_json: impl Into<String>) {
        self.styles_json = Some(styles_json.into());
    }

    #[must_use]
    pub fn field(&self, field: PromptField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Last stored selection JSON
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Last reported selection size
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl PromptHost for MemoryHost {
    fn read(&self, field: PromptField) -> Option<String> {
        self.fields.get(&field).cloned()
    }

    fn write(&mut self, field: PromptField, value: &str) {
        self.fields.insert(field, value.to_string());
        self.notifications.push(Notification::Field(field));
    }

    fn write_selection(&mut self, json: &str) {
        self.selection = Some(json.to_string());
        self.notifications.push(Notification::Selection);
    }

    fn selection_count(&mut self, count: usize) {
        self.count = count;
    }

    fn reload(&mut self) -> Option<CatalogData> {
        let styles = self.styles_json.as_deref()?;
        let order = self.order_json.as_deref().map(category_order_from_json).unwrap_or_default();
        Some(CatalogData::new(StyleSet::from_json_lossy(styles), order))
    }
}
