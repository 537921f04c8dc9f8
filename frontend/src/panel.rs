//! Open/closed state shared by the mobile sidebar, the dropdown nav and the
//! contact popup.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// Menu button / open button.
    Trigger,
    CloseButton,
    Overlay,
    Escape,
    /// A link inside the panel was followed.
    InnerLink,
}

/// What the trigger button does while the panel is already open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Button only opens; closing goes through close/overlay/Escape.
    Open,
    /// Button flips between states (dropdown nav).
    Toggle,
}

#[derive(Debug, Clone)]
pub struct Panel {
    state: PanelState,
    trigger: TriggerMode,
    closes_on_inner_link: bool,
}

impl Panel {
    pub fn sidebar() -> Self {
        Self {
            state: PanelState::Closed,
            trigger: TriggerMode::Open,
            closes_on_inner_link: true,
        }
    }

    pub fn popup() -> Self {
        Self {
            state: PanelState::Closed,
            trigger: TriggerMode::Open,
            closes_on_inner_link: false,
        }
    }

    pub fn dropdown() -> Self {
        Self {
            state: PanelState::Closed,
            trigger: TriggerMode::Toggle,
            closes_on_inner_link: false,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PanelState::Open
    }

    /// Applies `event` and returns the new state if it changed.
    pub fn handle(&mut self, event: PanelEvent) -> Option<PanelState> {
        let next = match (self.state, event) {
            (PanelState::Closed, PanelEvent::Trigger) => PanelState::Open,
            (PanelState::Open, PanelEvent::Trigger) => match self.trigger {
                TriggerMode::Open => return None,
                TriggerMode::Toggle => PanelState::Closed,
            },
            (PanelState::Open, PanelEvent::InnerLink) if !self.closes_on_inner_link => {
                return None;
            }
            (
                PanelState::Open,
                PanelEvent::CloseButton
                | PanelEvent::Overlay
                | PanelEvent::Escape
                | PanelEvent::InnerLink,
            ) => PanelState::Closed,
            (PanelState::Closed, _) => return None,
        };
        self.state = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_opens_from_button() {
        let mut panel = Panel::sidebar();
        assert_eq!(panel.state(), PanelState::Closed);
        assert_eq!(panel.handle(PanelEvent::Trigger), Some(PanelState::Open));
        assert!(panel.is_open());
        // Re-clicking the menu button keeps it open.
        assert_eq!(panel.handle(PanelEvent::Trigger), None);
        assert!(panel.is_open());
    }

    #[test]
    fn test_sidebar_close_events() {
        for event in [
            PanelEvent::CloseButton,
            PanelEvent::Overlay,
            PanelEvent::Escape,
            PanelEvent::InnerLink,
        ] {
            let mut panel = Panel::sidebar();
            panel.handle(PanelEvent::Trigger);
            assert_eq!(panel.handle(event), Some(PanelState::Closed), "{event:?}");
            assert!(!panel.is_open());
        }
    }

    #[test]
    fn test_escape_while_closed_is_noop() {
        let mut panel = Panel::sidebar();
        assert_eq!(panel.handle(PanelEvent::Escape), None);
        assert_eq!(panel.state(), PanelState::Closed);

        let mut popup = Panel::popup();
        assert_eq!(popup.handle(PanelEvent::Escape), None);
        assert_eq!(popup.handle(PanelEvent::Overlay), None);
        assert_eq!(popup.state(), PanelState::Closed);
    }

    #[test]
    fn test_popup_ignores_inner_links() {
        let mut popup = Panel::popup();
        popup.handle(PanelEvent::Trigger);
        assert_eq!(popup.handle(PanelEvent::InnerLink), None);
        assert!(popup.is_open());
        assert_eq!(popup.handle(PanelEvent::Escape), Some(PanelState::Closed));
    }

    #[test]
    fn test_dropdown_toggles() {
        let mut nav = Panel::dropdown();
        assert_eq!(nav.handle(PanelEvent::Trigger), Some(PanelState::Open));
        assert_eq!(nav.handle(PanelEvent::Trigger), Some(PanelState::Closed));
        assert_eq!(nav.handle(PanelEvent::Trigger), Some(PanelState::Open));
    }

    #[test]
    fn test_independent_panels() {
        let mut sidebar = Panel::sidebar();
        let mut popup = Panel::popup();
        sidebar.handle(PanelEvent::Trigger);
        assert!(sidebar.is_open());
        assert!(!popup.is_open());
        popup.handle(PanelEvent::Trigger);
        sidebar.handle(PanelEvent::Escape);
        assert!(!sidebar.is_open());
        assert!(popup.is_open());
    }
}
