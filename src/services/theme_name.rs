//! Theme name construction.
//!
//! Names follow `"{vendor} {color} {transparency} ({style}){size}{layout}"`.
//! The shell domain ignores the effective size and the button layout and
//! always builds the large, right-hand variant.

use crate::constants::{DEFAULT_COLOR, DEFAULT_TRANSPARENCY, THEME_VENDOR};
use crate::models::{
    LayoutLetter, SizeToken, ThemeDomain, ThemeIdentity, ThemeName, ThemeToken, WindowControls,
};

/// Size the shell theme is always built in.
pub const SHELL_SIZE: SizeToken = SizeToken::L;

/// Layout letter the shell theme is always built with.
pub const SHELL_LAYOUT: LayoutLetter = LayoutLetter::R;

/// Builds the canonical name for `identity`.
#[must_use]
pub fn build(identity: &ThemeIdentity) -> ThemeName {
    ThemeName::new(format!(
        "{} {} {} ({}){}{}",
        THEME_VENDOR,
        identity.color,
        identity.transparency,
        identity.style,
        identity.size,
        identity.layout
    ))
}

/// Assembles the identity of one domain from raw preference values.
///
/// Color and transparency are sanitized here, so every name built from the
/// returned identity is safe to use as a path segment.
#[must_use]
pub fn identity_for(
    domain: ThemeDomain,
    color: &str,
    transparency: &str,
    style: WindowControls,
    size: SizeToken,
    layout: LayoutLetter,
) -> ThemeIdentity {
    let (size, layout) = match domain {
        ThemeDomain::Application => (size, layout),
        ThemeDomain::Shell => (SHELL_SIZE, SHELL_LAYOUT),
    };

    ThemeIdentity {
        color: ThemeToken::sanitize(color, DEFAULT_COLOR),
        transparency: ThemeToken::sanitize(transparency, DEFAULT_TRANSPARENCY),
        style,
        size,
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_name_format() {
        let identity = identity_for(
            ThemeDomain::Application,
            "Steel",
            "Opaque",
            WindowControls::MacOs,
            SizeToken::XL,
            LayoutLetter::L,
        );
        assert_eq!(build(&identity).as_str(), "Semabe Steel Opaque (macOS)XLL");
    }

    #[test]
    fn test_shell_name_ignores_size_and_layout() {
        let identity = identity_for(
            ThemeDomain::Shell,
            "Steel",
            "Opaque",
            WindowControls::Breeze,
            SizeToken::XXL,
            LayoutLetter::M,
        );
        assert_eq!(build(&identity).as_str(), "Semabe Steel Opaque (breeze)LR");
    }

    #[test]
    fn test_name_uses_sanitized_tokens() {
        let identity = identity_for(
            ThemeDomain::Application,
            "Steel\"; echo pwned",
            "",
            WindowControls::Legacy,
            SizeToken::L,
            LayoutLetter::R,
        );
        assert_eq!(
            build(&identity).as_str(),
            "Semabe Steel echo pwned Opaque (legacy)LR"
        );
    }
}
