//! Toggleable label used when rendering word and city chips.

/// A clickable label with an on/off state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    label: String,
    enabled: bool,
    toggle_enabled: bool,
}

impl Tag {
    pub fn new(label: &str, enabled: bool) -> Self {
        Self {
            label: label.to_string(),
            enabled,
            toggle_enabled: true,
        }
    }

    /// Keep the visual state fixed on activation (e.g. city quick-picks).
    pub fn disable_toggle(mut self) -> Self {
        self.toggle_enabled = false;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Activate the tag: flips its state unless toggling is disabled and
    /// returns the label for the caller's handler.
    pub fn activate(&mut self) -> &str {
        if self.toggle_enabled {
            self.enabled = !self.enabled;
        }
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_toggles_and_returns_label() {
        let mut tag = Tag::new("Beds", true);
        assert_eq!(tag.activate(), "Beds");
        assert!(!tag.is_enabled());
        tag.activate();
        assert!(tag.is_enabled());
    }

    #[test]
    fn disabled_toggle_keeps_state() {
        let mut tag = Tag::new("Pune", false).disable_toggle();
        assert_eq!(tag.activate(), "Pune");
        assert!(!tag.is_enabled());
    }
}
