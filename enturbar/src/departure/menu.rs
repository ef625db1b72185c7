//! Route selection menu.
//!
//! Every saved pair appears twice, once per direction. The entry matching
//! the stored selection is checked.

use serde::Serialize;

use crate::domain::{RoutePair, Selection};

use super::display::NO_ROUTES_SAVED;

/// One row of the route menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub label: String,
    pub checked: bool,
    /// Stored-form selection to apply when picked; `None` for placeholders.
    pub selection: Option<String>,
}

impl MenuEntry {
    pub fn is_enabled(&self) -> bool {
        self.selection.is_some()
    }
}

/// Build the menu from the saved pairs and the current selection.
pub fn build_menu(pairs: &[RoutePair], active: Option<&Selection>) -> Vec<MenuEntry> {
    if pairs.is_empty() {
        return vec![MenuEntry {
            label: NO_ROUTES_SAVED.to_string(),
            checked: false,
            selection: None,
        }];
    }

    pairs
        .iter()
        .flat_map(|pair| {
            [
                Selection::forward(pair.id().clone()),
                Selection::reverse(pair.id().clone()),
            ]
            .into_iter()
            .map(move |selection| MenuEntry {
                label: pair.label(selection.is_reversed()),
                checked: active == Some(&selection),
                selection: Some(selection.to_string()),
            })
        })
        .collect()
}
