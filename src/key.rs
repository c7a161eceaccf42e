//! Type-safe key bindings with help metadata.
//!
//! This module provides the key binding system used by the data table widget
//! and by applications embedding it. A [`Binding`] pairs one or more key
//! combinations with help text and an enabled flag, so the same value drives
//! both input matching in `update()` and help rendering in the footer.
//!
//! Bindings can be built in two equivalent styles:
//!
//! ```rust
//! use bubbletea_datatable::key::{self, Binding};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! // Method style
//! let up = Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
//!     .with_help("↑/k", "up");
//!
//! // Functional-options style
//! let quit = key::new_binding(vec![
//!     key::with_keys_str(&["ctrl+c", "q"]),
//!     key::with_help("q", "quit"),
//! ]);
//!
//! assert_eq!(up.help().key, "↑/k");
//! assert!(quit.enabled());
//! ```
//!
//! Components expose their bindings through the [`KeyMap`] trait, which help
//! views consume to produce one-line or multi-column listings.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key combination: a key code plus modifier keys.
///
/// Most bindings are plain codes (`KeyCode::Up`), which convert via `From`.
/// Combinations with modifiers are written as tuples:
///
/// ```rust
/// use bubbletea_datatable::key::KeyPress;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let plain: KeyPress = KeyCode::Enter.into();
/// let combo: KeyPress = (KeyCode::Char('s'), KeyModifiers::CONTROL).into();
/// assert_eq!(plain.mods, KeyModifiers::NONE);
/// assert_eq!(combo.mods, KeyModifiers::CONTROL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code of the combination.
    pub code: KeyCode,
    /// Modifier keys that must be held.
    pub mods: KeyModifiers,
}

impl KeyPress {
    fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        if self.mods == msg.modifiers {
            return true;
        }
        // Shifted characters arrive from crossterm with SHIFT set; a binding
        // declared as a bare uppercase char should still match.
        matches!(self.code, KeyCode::Char(_))
            && self.mods.is_empty()
            && msg.modifiers == KeyModifiers::SHIFT
    }
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

impl From<char> for KeyPress {
    fn from(c: char) -> Self {
        KeyCode::Char(c).into()
    }
}

/// Parses a human-readable key name like `"ctrl+c"`, `"pgup"` or `"G"`.
///
/// Returns `None` for names that don't correspond to a key. Recognized
/// modifier prefixes are `ctrl+`, `alt+` and `shift+`, in any combination.
fn parse_key(name: &str) -> Option<KeyPress> {
    let mut mods = KeyModifiers::NONE;
    let mut rest = name;
    loop {
        if let Some(stripped) = rest.strip_prefix("ctrl+") {
            mods |= KeyModifiers::CONTROL;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("alt+") {
            mods |= KeyModifiers::ALT;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("shift+") {
            mods |= KeyModifiers::SHIFT;
            rest = stripped;
        } else {
            break;
        }
    }

    let code = match rest {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdown" | "pgdn" | "pagedown" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => {
                    if let Some(num) = rest.strip_prefix('f') {
                        KeyCode::F(num.parse().ok()?)
                    } else {
                        return None;
                    }
                }
            }
        }
    };
    Some(KeyPress { code, mods })
}

/// Help metadata for a binding: the key label and a short description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Display label for the key(s), e.g. `"↑/k"`.
    pub key: String,
    /// Short action description, e.g. `"up"`.
    pub desc: String,
}

/// A key binding: the combinations that trigger it, its help text, and
/// whether it is currently enabled.
///
/// Disabled bindings never match input and are skipped by help views. A
/// binding with no keys is treated as disabled.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding matching any of the given key combinations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_datatable::key::Binding;
    /// use crossterm::event::KeyCode;
    ///
    /// let next = Binding::new(vec![KeyCode::Down, KeyCode::Char('j')]);
    /// assert!(next.enabled());
    /// ```
    pub fn new<T: Into<KeyPress>>(keys: Vec<T>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text shown for this binding.
    pub fn with_help(mut self, key: &str, desc: &str) -> Self {
        self.help = Help {
            key: key.to_string(),
            desc: desc.to_string(),
        };
        self
    }

    /// Marks the binding disabled at construction time.
    pub fn with_disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Returns the key combinations this binding listens for.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Replaces the key combinations.
    pub fn set_keys<T: Into<KeyPress>>(&mut self, keys: Vec<T>) {
        self.keys = keys.into_iter().map(Into::into).collect();
    }

    /// Returns the help metadata.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Replaces the help metadata.
    pub fn set_help(&mut self, key: &str, desc: &str) {
        self.help = Help {
            key: key.to_string(),
            desc: desc.to_string(),
        };
    }

    /// Reports whether this binding is active.
    ///
    /// A binding is active when it has at least one key and has not been
    /// disabled.
    pub fn enabled(&self) -> bool {
        !self.keys.is_empty() && !self.disabled
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Removes all keys, leaving the binding permanently inert.
    pub fn unbind(&mut self) {
        self.keys.clear();
    }

    /// Reports whether the given key message triggers this binding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_datatable::key::Binding;
    /// use bubbletea_rs::KeyMsg;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let up = Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]);
    /// let msg = KeyMsg { key: KeyCode::Char('k'), modifiers: KeyModifiers::NONE };
    /// assert!(up.matches(&msg));
    /// ```
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// A functional option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from a list of options.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::key;
///
/// let toggle = key::new_binding(vec![
///     key::with_keys_str(&["enter", "space"]),
///     key::with_help("enter", "toggle"),
/// ]);
/// assert_eq!(toggle.keys().len(), 2);
/// ```
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Option: sets the key combinations from typed values.
pub fn with_keys<T: Into<KeyPress> + 'static>(keys: Vec<T>) -> BindingOpt {
    Box::new(move |b: &mut Binding| b.set_keys(keys))
}

/// Option: sets the key combinations from human-readable names.
///
/// Names follow the usual terminal conventions: `"up"`, `"pgdown"`,
/// `"ctrl+c"`, `"alt+left"`, `"space"`, single characters, and `"f1"`..
/// Unrecognized names are ignored.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let parsed: Vec<KeyPress> = keys.iter().filter_map(|k| parse_key(k)).collect();
    Box::new(move |b: &mut Binding| b.set_keys(parsed))
}

/// Option: sets the help text.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

/// Option: disables the binding.
pub fn with_disabled() -> BindingOpt {
    Box::new(|b: &mut Binding| b.disabled = true)
}

/// Reports whether the message triggers the given binding.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

/// Reports whether the message triggers any of the given bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Exposes a component's bindings to help views.
///
/// `short_help` returns the essentials for a one-line listing; `full_help`
/// returns columns of bindings for an expanded view.
pub trait KeyMap {
    /// Bindings for the compact single-line help view.
    fn short_help(&self) -> Vec<&Binding>;
    /// Binding columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
