//! Lift-on-hover transforms for cards and process steps.

pub const ICON_SELECTOR: &str = ".feature-icon, .service-icon";
pub const STEP_NUMBER_SELECTOR: &str = ".step-number";

const ICON_ENTER: &str = "scale(1.1)";
const ICON_LEAVE: &str = "scale(1)";

#[derive(Debug, Clone, PartialEq)]
pub struct HoverEffect {
    pub lift_px: f64,
    pub scale: Option<f64>,
    /// Also scale the card's icon.
    pub scale_icon: bool,
    /// Skip the reset while the card's top edge is at or above the viewport
    /// top, so it doesn't fight a running reveal transform.
    pub guard_viewport_top: bool,
}

impl HoverEffect {
    pub fn enter_transform(&self) -> String {
        match self.scale {
            Some(scale) => format!("translateY(-{}px) scale({})", self.lift_px, scale),
            None => format!("translateY(-{}px)", self.lift_px),
        }
    }

    /// Transform to restore on pointer-leave, or `None` when the reset is
    /// skipped for a card scrolled past the top edge.
    pub fn leave_transform(&self, rect_top: f64) -> Option<&'static str> {
        if self.guard_viewport_top && rect_top <= 0.0 {
            return None;
        }
        Some(match self.scale {
            Some(_) => "translateY(0) scale(1)",
            None => "translateY(0)",
        })
    }

    pub fn icon_transform(&self, hovered: bool) -> Option<&'static str> {
        if !self.scale_icon {
            return None;
        }
        Some(if hovered { ICON_ENTER } else { ICON_LEAVE })
    }
}

pub fn step_number_transform(hovered: bool) -> &'static str {
    if hovered {
        ICON_ENTER
    } else {
        ICON_LEAVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lift_and_scale() -> HoverEffect {
        HoverEffect {
            lift_px: 12.0,
            scale: Some(1.02),
            scale_icon: false,
            guard_viewport_top: false,
        }
    }

    fn guarded_lift() -> HoverEffect {
        HoverEffect {
            lift_px: 10.0,
            scale: None,
            scale_icon: true,
            guard_viewport_top: true,
        }
    }

    #[test]
    fn test_lift_and_scale() {
        let effect = lift_and_scale();
        assert_eq!(effect.enter_transform(), "translateY(-12px) scale(1.02)");
        assert_eq!(effect.leave_transform(-300.0), Some("translateY(0) scale(1)"));
        assert_eq!(effect.icon_transform(true), None);
    }

    #[test]
    fn test_guarded_leave() {
        let effect = guarded_lift();
        assert_eq!(effect.enter_transform(), "translateY(-10px)");
        assert_eq!(effect.leave_transform(120.0), Some("translateY(0)"));
        assert_eq!(effect.leave_transform(0.0), None);
        assert_eq!(effect.leave_transform(-5.0), None);
    }

    #[test]
    fn test_icon_and_step_scale() {
        let effect = guarded_lift();
        assert_eq!(effect.icon_transform(true), Some("scale(1.1)"));
        assert_eq!(effect.icon_transform(false), Some("scale(1)"));
        assert_eq!(step_number_transform(true), "scale(1.1)");
        assert_eq!(step_number_transform(false), "scale(1)");
    }
}
