//! Keyboard shortcut dispatch.
//!
//! Keys are DOM `KeyboardEvent.key` names ("t", "ArrowUp", "Escape", "?").
//! Dispatch is pure: it maps one key press to at most one [`Shortcut`];
//! the controller performs it. The Konami tracker runs alongside on every key.

use std::time::Duration;

pub const HELP_TOAST_DURATION: Duration = Duration::from_secs(8);

pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    /// Focus is in an `<input>` or `<textarea>`.
    pub in_text_field: bool,
}

impl KeyPress {
    pub fn plain(key: impl Into<String>) -> Self {
        KeyPress {
            key: key.into(),
            ctrl: false,
            in_text_field: false,
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        KeyPress {
            ctrl: true,
            ..KeyPress::plain(key)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    CloseMenus,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ToggleContactMenu,
    DownloadPdf,
    Print,
    ToggleTheme,
    ToggleShareMenu,
    ToggleReadingMode,
    TogglePresentationMode,
    ShowHelp,
}

/// Maps a key press to its shortcut, if any.
///
/// Ctrl+`+`/`-`/`0` win over letters; letters are case-insensitive and
/// ignored while typing in a text field. Escape always closes menus.
pub fn dispatch(press: &KeyPress) -> Option<Shortcut> {
    if press.key == "Escape" {
        return Some(Shortcut::CloseMenus);
    }

    if press.ctrl {
        match press.key.as_str() {
            "+" => return Some(Shortcut::ZoomIn),
            "-" => return Some(Shortcut::ZoomOut),
            "0" => return Some(Shortcut::ZoomReset),
            _ => {}
        }
    }

    if press.in_text_field {
        return None;
    }

    if press.key == "?" {
        return Some(Shortcut::ShowHelp);
    }

    match press.key.to_lowercase().as_str() {
        "c" => Some(Shortcut::ToggleContactMenu),
        "d" => Some(Shortcut::DownloadPdf),
        "p" => Some(Shortcut::Print),
        "t" => Some(Shortcut::ToggleTheme),
        "s" => Some(Shortcut::ToggleShareMenu),
        "f" => Some(Shortcut::ToggleReadingMode),
        "m" => Some(Shortcut::TogglePresentationMode),
        _ => None,
    }
}

pub fn help_message() -> String {
    [
        "Raccourcis :",
        "C: Contact",
        "D: Télécharger le PDF",
        "P: Imprimer",
        "T: Thème",
        "S: Partager",
        "F: Mode lecture",
        "M: Mode présentation",
        "Ctrl+ / Ctrl- / Ctrl0: Zoom PDF",
    ]
    .join(" | ")
}

/// Tracks progress through [`KONAMI_CODE`].
#[derive(Debug, Clone, Default)]
pub struct KonamiTracker {
    index: usize,
}

impl KonamiTracker {
    /// Feeds one key; returns true when it completes the sequence.
    /// A wrong key resets progress to zero without counting as a restart.
    pub fn feed(&mut self, key: &str) -> bool {
        if key == KONAMI_CODE[self.index] {
            self.index += 1;
            if self.index == KONAMI_CODE.len() {
                self.index = 0;
                return true;
            }
        } else {
            self.index = 0;
        }
        false
    }

    #[cfg(test)]
    pub fn progress(&self) -> usize {
        self.index
    }
}
