//! Hamburger menu visibility.

/// Visibility of the nav-links panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelDisplay {
    Shown,
    Hidden,
}

impl PanelDisplay {
    /// Only an inline `display: flex` counts as shown; an empty inline style
    /// (stylesheet-controlled) counts as hidden.
    pub fn from_inline_style(value: &str) -> Self {
        if value.trim() == "flex" {
            PanelDisplay::Shown
        } else {
            PanelDisplay::Hidden
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            PanelDisplay::Shown => "flex",
            PanelDisplay::Hidden => "none",
        }
    }
}

/// Two-state toggle bound to the `.menu-toggle` control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuToggle {
    display: PanelDisplay,
}

impl MenuToggle {
    pub fn new(display: PanelDisplay) -> Self {
        Self { display }
    }

    pub fn display(&self) -> PanelDisplay {
        self.display
    }

    /// Flip visibility and return the CSS `display` value to apply.
    pub fn toggle(&mut self) -> &'static str {
        self.display = match self.display {
            PanelDisplay::Shown => PanelDisplay::Hidden,
            PanelDisplay::Hidden => PanelDisplay::Shown,
        };
        self.display.as_css()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_toggle_from_unstyled_panel_shows_it() {
        let mut menu = MenuToggle::new(PanelDisplay::from_inline_style(""));
        assert_eq!(menu.toggle(), "flex");
        assert_eq!(menu.toggle(), "none");
    }

    #[test]
    fn toggling_twice_restores_state() {
        for start in [PanelDisplay::Shown, PanelDisplay::Hidden] {
            let mut menu = MenuToggle::new(start);
            menu.toggle();
            menu.toggle();
            assert_eq!(menu.display(), start);
        }
    }
}
