/// On/off UI flags owned by the page controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModes {
    pub reading: bool,
    pub presentation: bool,
    pub fullscreen: bool,
    pub contact_menu_open: bool,
    pub share_menu_open: bool,
    pub qr_modal_open: bool,
}

impl ViewModes {
    /// Closes both dropdown menus; returns whether any was open.
    pub fn close_menus(&mut self) -> bool {
        let was_open = self.contact_menu_open || self.share_menu_open;
        self.contact_menu_open = false;
        self.share_menu_open = false;
        was_open
    }

    /// CSS classes the body carries for the current modes.
    pub fn body_classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.reading {
            classes.push("reading-mode");
        }
        if self.presentation {
            classes.push("presentation-mode");
        }
        classes
    }
}

pub fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

pub fn open_close(flag: bool) -> &'static str {
    if flag {
        "open"
    } else {
        "close"
    }
}
