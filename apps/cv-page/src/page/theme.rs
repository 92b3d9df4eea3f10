use std::fmt;
use std::str::FromStr;

/// Battery level below which the saver forces the dark theme.
pub const LOW_BATTERY_LEVEL: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the toggle button, describing what clicking it will do.
    pub fn toggle_aria_label(&self) -> &'static str {
        match self {
            Theme::Dark => "Passer en mode clair",
            Theme::Light => "Passer en mode sombre",
        }
    }

    pub fn activated_message(&self) -> &'static str {
        match self {
            Theme::Dark => "Mode sombre activé.",
            Theme::Light => "Mode clair activé.",
        }
    }

    /// Stored preference wins; unknown or missing values fall back to the system preference.
    pub fn initial(stored: Option<&str>, prefers_dark: bool) -> Theme {
        match stored.map(Theme::from_str) {
            Some(Ok(theme)) => theme,
            _ if prefers_dark => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryStatus {
    pub level: f64,
    pub charging: bool,
}

/// True when a discharging, low battery should switch a light page to dark.
pub fn battery_forces_dark(battery: BatteryStatus, current: Theme) -> bool {
    !battery.charging && battery.level < LOW_BATTERY_LEVEL && current != Theme::Dark
}
