//! Symbolic icon replacement planning.
//!
//! [`plan_icons`] turns an icon request into the effects the dispatcher
//! executes: which style and icon theme the script receives, whether an
//! auto-detected theme gets remembered, and which notice to show when the
//! request cannot run.

use super::effects::{Effect, NOTICE_TITLE};
use crate::models::{IconMode, IconRequest, Preferences};

/// Notice shown when neither the settings nor the desktop name an icon theme.
pub const NO_ICON_THEME: &str = "No icon theme detected or selected!";

/// Style argument the script expects for a restore.
pub const RESTORE_STYLE: &str = "-";

/// Effects of one icon request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPlan {
    /// The script run, `None` when the request was rejected
    pub request: Option<IconRequest>,
    /// Side effects, in execution order
    pub effects: Vec<Effect>,
}

impl IconPlan {
    fn rejected(message: String) -> Self {
        Self {
            request: None,
            effects: vec![Effect::NotifyError {
                title: NOTICE_TITLE.to_string(),
                message,
            }],
        }
    }

    /// Message of the rejection notice, if the request was rejected.
    #[must_use]
    pub fn rejection(&self) -> Option<&str> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::NotifyError { message, .. } if self.request.is_none() => Some(message.as_str()),
            _ => None,
        })
    }
}

/// Plans an icon script run for `mode`.
///
/// The icon theme comes from the settings and falls back to `detected`, the
/// desktop's current icon theme, which is then stored.
#[must_use]
pub fn plan_icons(mode: IconMode, prefs: &Preferences, detected: Option<&str>) -> IconPlan {
    let mut effects = Vec::new();

    let target = match (non_blank(prefs.icon_theme.as_deref()), non_blank(detected)) {
        (Some(selected), _) => selected.to_string(),
        (None, Some(detected)) => {
            effects.push(Effect::StoreIconTheme {
                theme: detected.to_string(),
            });
            detected.to_string()
        }
        (None, None) => return IconPlan::rejected(NO_ICON_THEME.to_string()),
    };
    if !is_directory_name(&target) {
        return IconPlan::rejected(format!("Invalid icon theme name '{target}'"));
    }

    let style = match mode {
        IconMode::Restore => RESTORE_STYLE.to_string(),
        IconMode::Controls => match non_blank(prefs.controls_style.as_deref()) {
            Some(style) => style.to_string(),
            None => return IconPlan::rejected(format!("No {mode} style selected!")),
        },
        IconMode::Arrows => match non_blank(prefs.arrows_style.as_deref()) {
            Some(style) => style.to_string(),
            None => return IconPlan::rejected(format!("No {mode} style selected!")),
        },
    };
    if mode != IconMode::Restore && !is_directory_name(&style) {
        return IconPlan::rejected(format!("Invalid {mode} style '{style}'"));
    }

    let request = IconRequest {
        mode,
        style,
        target,
    };
    effects.push(Effect::RunIconScript(request.clone()));

    IconPlan {
        request: Some(request),
        effects,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Both the style and the icon theme become single path components.
fn is_directory_name(name: &str) -> bool {
    !matches!(name, "." | "..") && !name.chars().any(|c| c == '/' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(theme: Option<&str>) -> Preferences {
        Preferences {
            controls_style: Some("round".to_string()),
            arrows_style: Some("thin".to_string()),
            icon_theme: theme.map(String::from),
            ..Preferences::default()
        }
    }

    #[test]
    fn test_selected_theme_wins_over_detected() {
        let plan = plan_icons(IconMode::Controls, &prefs(Some("Papirus")), Some("Mint-Y"));
        let request = plan.request.unwrap();
        assert_eq!(request.args(), ["controls", "round", "Papirus"]);
        assert_eq!(plan.effects.len(), 1);
    }

    #[test]
    fn test_detected_theme_is_remembered_before_the_run() {
        let plan = plan_icons(IconMode::Arrows, &prefs(None), Some("Mint-Y"));
        assert_eq!(
            plan.effects[0],
            Effect::StoreIconTheme {
                theme: "Mint-Y".to_string()
            }
        );
        assert!(matches!(
            &plan.effects[1],
            Effect::RunIconScript(request) if request.args() == ["arrows", "thin", "Mint-Y"]
        ));
    }

    #[test]
    fn test_restore_uses_placeholder_style() {
        let mut p = prefs(Some("Mint-Y"));
        p.controls_style = None;
        let plan = plan_icons(IconMode::Restore, &p, None);
        assert_eq!(plan.request.unwrap().style, RESTORE_STYLE);
    }

    #[test]
    fn test_missing_theme_only_notifies() {
        let plan = plan_icons(IconMode::Controls, &prefs(Some("  ")), None);
        assert_eq!(plan.request, None);
        assert_eq!(plan.rejection(), Some(NO_ICON_THEME));
        assert_eq!(plan.effects.len(), 1);
    }

    #[test]
    fn test_missing_style_is_rejected() {
        let mut p = prefs(Some("Mint-Y"));
        p.arrows_style = None;
        let plan = plan_icons(IconMode::Arrows, &p, None);
        assert_eq!(plan.rejection(), Some("No arrows style selected!"));
    }

    #[test]
    fn test_names_that_escape_the_icon_directory_are_rejected() {
        let plan = plan_icons(IconMode::Restore, &prefs(Some("../.themes")), None);
        assert!(plan.rejection().unwrap().contains("Invalid icon theme"));

        let mut p = prefs(Some("Mint-Y"));
        p.controls_style = Some("..".to_string());
        let plan = plan_icons(IconMode::Controls, &p, None);
        assert!(plan.rejection().unwrap().contains("Invalid controls style"));
    }
}
