//! Effective size resolution.
//!
//! The effective size is read from the size slot of the active style and
//! checked against that style's allowed sizes. An invalid slot never makes
//! it into a theme name: it is replaced by `L` and reported as a
//! [`SizeCorrection`] for the caller to persist and announce.

use crate::models::{SizePreferences, SizeToken, WindowControls};

/// Size every style falls back to.
pub const FALLBACK_SIZE: SizeToken = SizeToken::L;

/// A size slot that had to be reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeCorrection {
    /// Style whose slot held the bad value
    pub style: WindowControls,
    /// The rejected raw value, verbatim
    pub rejected: String,
    /// Value the slot is reset to
    pub corrected: SizeToken,
}

impl SizeCorrection {
    /// Notification title naming the rejected size and style.
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "Unsupported size \"{}\" for style \"{}\".",
            self.rejected, self.style
        )
    }

    /// Notification body.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Size has been reset to \"{}\".", self.corrected)
    }
}

/// Outcome of checking a size against a style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeCheck {
    /// The size is shipped for the style
    Valid(SizeToken),
    /// The size is missing, malformed or not shipped for the style
    CorrectionRequired(SizeCorrection),
}

/// Result of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Size to build theme names with; always allowed for the style
    pub size: SizeToken,
    /// Present when the stored slot had to be reset
    pub correction: Option<SizeCorrection>,
}

/// Returns the raw size slot for `style`, or the fallback for an
/// unrecognized style.
#[must_use]
pub fn selected_size(style: Option<WindowControls>, sizes: &SizePreferences) -> &str {
    style.map_or(FALLBACK_SIZE.as_str(), |style| sizes.slot(style))
}

/// Checks `raw` against the sizes shipped for `style`.
#[must_use]
pub fn validate(style: WindowControls, raw: &str) -> SizeCheck {
    match raw.parse::<SizeToken>() {
        Ok(size) if style.allows(size) => SizeCheck::Valid(size),
        _ => SizeCheck::CorrectionRequired(SizeCorrection {
            style,
            rejected: raw.to_string(),
            corrected: FALLBACK_SIZE,
        }),
    }
}

/// Computes the effective size for `style` from its size slot.
///
/// An unrecognized style (`None`) resolves to `L` without a correction,
/// since there is no slot to repair.
#[must_use]
pub fn resolve(style: Option<WindowControls>, sizes: &SizePreferences) -> Resolution {
    let Some(style) = style else {
        return Resolution {
            size: FALLBACK_SIZE,
            correction: None,
        };
    };

    match validate(style, selected_size(Some(style), sizes)) {
        SizeCheck::Valid(size) => Resolution {
            size,
            correction: None,
        },
        SizeCheck::CorrectionRequired(correction) => Resolution {
            size: correction.corrected,
            correction: Some(correction),
        },
    }
}
