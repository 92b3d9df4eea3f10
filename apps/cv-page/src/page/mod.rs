// Page collaborators: each owns one small piece of UI state and reports
// what it did to the event log through the controller in `state`.

pub mod clipboard;
pub mod modes;
pub mod pdf;
pub mod scroll;
pub mod share;
pub mod shortcuts;
pub mod theme;
pub mod toast;
pub mod version;

pub use clipboard::ClipboardWrite;
pub use modes::ViewModes;
pub use pdf::{PdfLoad, PdfZoom};
pub use scroll::{scroll_ui, ScrollMetrics, ScrollUi};
pub use share::SharePlatform;
pub use shortcuts::{KeyPress, KonamiTracker, Shortcut};
pub use theme::{BatteryStatus, Theme};
pub use toast::{Toast, ToastQueue};
pub use version::{check_cv_version, VersionCheck};
