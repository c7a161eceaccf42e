//! Key bindings for the data table widget.

use crate::key::{self, KeyMap as KeyMapTrait};

/// Key bindings for cursor movement and toggling.
///
/// The default bindings follow the usual arrow/vim pairing. Replace
/// individual bindings to customize:
///
/// ```rust
/// use bubbletea_datatable::datatable::TableKeyMap;
/// use bubbletea_datatable::key;
///
/// let keymap = TableKeyMap {
///     toggle: key::new_binding(vec![
///         key::with_keys_str(&["x"]),
///         key::with_help("x", "toggle"),
///     ]),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct TableKeyMap {
    /// Move the cursor one row up.
    pub row_up: key::Binding,
    /// Move the cursor one row down.
    pub row_down: key::Binding,
    /// Move the cursor to the previous category column.
    pub col_left: key::Binding,
    /// Move the cursor to the next category column.
    pub col_right: key::Binding,
    /// Toggle the category cell under the cursor.
    pub toggle: key::Binding,
}

impl Default for TableKeyMap {
    fn default() -> Self {
        Self {
            row_up: key::new_binding(vec![
                key::with_keys_str(&["up", "k"]),
                key::with_help("↑/k", "up"),
            ]),
            row_down: key::new_binding(vec![
                key::with_keys_str(&["down", "j"]),
                key::with_help("↓/j", "down"),
            ]),
            col_left: key::new_binding(vec![
                key::with_keys_str(&["left", "h"]),
                key::with_help("←/h", "prev column"),
            ]),
            col_right: key::new_binding(vec![
                key::with_keys_str(&["right", "l"]),
                key::with_help("→/l", "next column"),
            ]),
            toggle: key::new_binding(vec![
                key::with_keys_str(&["enter", " "]),
                key::with_help("enter/space", "toggle cell"),
            ]),
        }
    }
}

impl KeyMapTrait for TableKeyMap {
    /// Returns the bindings shown in the compact help line.
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.row_up, &self.row_down, &self.toggle]
    }

    /// Returns all bindings grouped into help columns.
    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.row_up, &self.row_down],
            vec![&self.col_left, &self.col_right],
            vec![&self.toggle],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubbletea_rs::KeyMsg;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key_msg(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_default_bindings_match_expected_keys() {
        let keymap = TableKeyMap::default();
        assert!(keymap.row_up.matches(&key_msg(KeyCode::Up)));
        assert!(keymap.row_up.matches(&key_msg(KeyCode::Char('k'))));
        assert!(keymap.row_down.matches(&key_msg(KeyCode::Down)));
        assert!(keymap.toggle.matches(&key_msg(KeyCode::Enter)));
        assert!(keymap.toggle.matches(&key_msg(KeyCode::Char(' '))));
    }

    #[test]
    fn test_help_views_cover_all_bindings() {
        let keymap = TableKeyMap::default();
        assert_eq!(keymap.short_help().len(), 3);
        let total: usize = keymap.full_help().iter().map(|col| col.len()).sum();
        assert_eq!(total, 5);
    }
}
