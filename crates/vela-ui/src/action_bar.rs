//! Action-bar widget state.
//!
//! The action bar is a thin observable-properties container: it holds the
//! title, an optional navigation button, and an ordered list of action
//! items. It has no rendering of its own — a native toolbar renders it, and
//! every mutation pushes an [`ActionBarEvent`] that the host drains to decide
//! when to rebuild the native menu.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from action-item management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionBarError {
    /// The referenced item index does not exist.
    #[error("no action item at index {index}")]
    ItemNotFound { index: usize },
}

/// A single entry in the action-item collection (or the navigation slot).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionItem {
    /// Label shown when the platform renders the item as text.
    pub text: String,
    /// Optional icon resource name; platforms prefer it over text.
    pub icon: Option<String>,
}

impl ActionItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Change notification emitted by [`ActionBar`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionBarEvent {
    /// The title text changed.
    TitleChanged,
    /// The navigation button was set, replaced, or cleared.
    NavigationButtonChanged,
    /// The action-item collection changed (add, remove, or replace).
    ItemsChanged,
    /// An action item was tapped by the user.
    ItemTapped { index: usize },
}

/// Platform-neutral action-bar state.
#[derive(Debug, Default)]
pub struct ActionBar {
    title: Option<String>,
    navigation_button: Option<ActionItem>,
    items: Vec<ActionItem>,
    events: VecDeque<ActionBarEvent>,
}

impl ActionBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set or clear the title. Emits only when the value actually changes.
    pub fn set_title(&mut self, title: Option<String>) {
        if self.title != title {
            self.title = title;
            self.events.push_back(ActionBarEvent::TitleChanged);
        }
    }

    pub fn navigation_button(&self) -> Option<&ActionItem> {
        self.navigation_button.as_ref()
    }

    /// Set or clear the navigation button.
    pub fn set_navigation_button(&mut self, button: Option<ActionItem>) {
        if self.navigation_button != button {
            self.navigation_button = button;
            self.events.push_back(ActionBarEvent::NavigationButtonChanged);
        }
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&ActionItem> {
        self.items.get(index)
    }

    /// Append an action item; returns its index.
    pub fn add_item(&mut self, item: ActionItem) -> usize {
        self.items.push(item);
        self.events.push_back(ActionBarEvent::ItemsChanged);
        self.items.len() - 1
    }

    /// Remove the item at `index`.
    pub fn remove_item(&mut self, index: usize) -> Result<ActionItem, ActionBarError> {
        if index >= self.items.len() {
            return Err(ActionBarError::ItemNotFound { index });
        }
        let item = self.items.remove(index);
        self.events.push_back(ActionBarEvent::ItemsChanged);
        Ok(item)
    }

    /// Replace the whole collection with a single change notification.
    pub fn set_items(&mut self, items: Vec<ActionItem>) {
        self.items = items;
        self.events.push_back(ActionBarEvent::ItemsChanged);
    }

    /// Report a user tap on the item at `index`.
    pub fn tap_item(&mut self, index: usize) -> Result<(), ActionBarError> {
        if index >= self.items.len() {
            return Err(ActionBarError::ItemNotFound { index });
        }
        self.events.push_back(ActionBarEvent::ItemTapped { index });
        Ok(())
    }

    /// Whether the native toolbar should be visible at all: there is a
    /// title, a navigation button, or at least one action item.
    pub fn should_show(&self) -> bool {
        self.title.is_some() || self.navigation_button.is_some() || !self.items.is_empty()
    }

    /// Drain pending change events in emission order.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ActionBarEvent> + '_ {
        self.events.drain(..)
    }
}
