pub const SHOW_RULES_LABEL: &str = "Show Rules";
pub const HIDE_RULES_LABEL: &str = "Hide Rules";
/// Class toggled on the rules content element.
pub const RULES_VISIBLE_CLASS: &str = "is-visible";

/// Client-side visibility of the rules panel. Starts hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RulesPanel {
    visible: bool,
}

impl RulesPanel {
    pub fn with_visibility(visible: bool) -> Self {
        Self { visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Returns true if the panel was hidden before.
    pub fn open(&mut self) -> bool {
        let changed = !self.visible;
        self.visible = true;
        changed
    }

    /// Returns true if the panel was visible before.
    pub fn close(&mut self) -> bool {
        let changed = self.visible;
        self.visible = false;
        changed
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.visible {
            HIDE_RULES_LABEL
        } else {
            SHOW_RULES_LABEL
        }
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.visible { "true" } else { "false" }
    }
}
