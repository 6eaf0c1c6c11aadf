//! Change planning.
//!
//! Deciding what a preference change means is a pure function of the
//! preference snapshot: [`plan_cycle`] resolves the effective size, both
//! theme names and both paths, and lists the side effects the dispatcher
//! has to carry out. Nothing here performs I/O.

use serde::Serialize;

use super::{layout_classifier, size_resolver, theme_name, theme_path};
use crate::models::{
    IconRequest, Preferences, SettingKey, SizeToken, ThemeDomain, ThemeName, ThemePath,
    WindowControls,
};

/// Title used for notices that are not about a specific correction.
pub const NOTICE_TITLE: &str = "Semabe Theme Selector";

/// A side effect requested by a cycle, executed by collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write `size` into the size slot of `style`
    PersistSize {
        /// Style whose slot is repaired
        style: WindowControls,
        /// New slot value
        size: SizeToken,
    },
    /// Show a notice to the user
    Notify {
        /// Notice title
        title: String,
        /// Notice body
        message: String,
    },
    /// Restart the external settings window
    RestartSettingsUi,
    /// Apply both theme paths
    Apply {
        /// Application theme path
        application: ThemePath,
        /// Shell theme path
        shell: ThemePath,
    },
    /// Show a failure notice to the user
    NotifyError {
        /// Notice title
        title: String,
        /// Notice body
        message: String,
    },
    /// Remember an auto-detected icon theme as the selected one
    StoreIconTheme {
        /// Icon theme directory name
        theme: String,
    },
    /// Run the icon script, then reload the icon theme on success
    RunIconScript(IconRequest),
}

/// Name and path of one domain's theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTheme {
    /// Which setting this theme is for
    pub domain: ThemeDomain,
    /// Style the theme was built for
    pub style: WindowControls,
    /// Canonical name
    pub name: ThemeName,
    /// Relative theme directory
    pub path: ThemePath,
}

/// Everything one resolution cycle decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePlan {
    /// Size the application theme is built with
    pub effective_size: SizeToken,
    /// Application theme
    pub application: ResolvedTheme,
    /// Shell theme
    pub shell: ResolvedTheme,
    /// Side effects, in execution order
    pub effects: Vec<Effect>,
}

impl CyclePlan {
    /// Returns true if the cycle had to repair a size slot.
    #[must_use]
    pub fn corrected(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, Effect::PersistSize { .. }))
    }
}

/// Resolves both themes from `prefs` and lists the resulting effects.
#[must_use]
pub fn plan_cycle(prefs: &Preferences) -> CyclePlan {
    let app_style = prefs.style();
    let resolution = size_resolver::resolve(app_style, &prefs.sizes);
    let layout = layout_classifier::classify_opt(prefs.layout());

    let mut effects = Vec::new();
    if let Some(correction) = &resolution.correction {
        effects.push(Effect::PersistSize {
            style: correction.style,
            size: correction.corrected,
        });
        effects.push(Effect::Notify {
            title: correction.title(),
            message: correction.message(),
        });
        effects.push(Effect::RestartSettingsUi);
    }

    let application = resolve_theme(
        ThemeDomain::Application,
        &prefs.color,
        &prefs.transparency,
        app_style.unwrap_or_default(),
        resolution.size,
        layout,
    );
    let shell = resolve_theme(
        ThemeDomain::Shell,
        &prefs.shell_color,
        &prefs.shell_transparency,
        prefs.shell_style().unwrap_or_default(),
        resolution.size,
        layout,
    );

    effects.push(Effect::Apply {
        application: application.path.clone(),
        shell: shell.path.clone(),
    });

    CyclePlan {
        effective_size: resolution.size,
        application,
        shell,
        effects,
    }
}

/// Plans the effects of `key` changing to `value`.
///
/// The change is applied to a copy of `prefs`; the caller's snapshot is
/// left untouched.
#[must_use]
pub fn on_change(prefs: &Preferences, key: SettingKey, value: &str) -> CyclePlan {
    let mut next = prefs.clone();
    next.apply_change(key, value);
    plan_cycle(&next)
}

fn resolve_theme(
    domain: ThemeDomain,
    color: &str,
    transparency: &str,
    style: WindowControls,
    size: SizeToken,
    layout: crate::models::LayoutLetter,
) -> ResolvedTheme {
    let identity = theme_name::identity_for(domain, color, transparency, style, size, layout);
    let name = theme_name::build(&identity);
    let path = theme_path::build_path(&name, style);
    ResolvedTheme {
        domain,
        style,
        name,
        path,
    }
}
