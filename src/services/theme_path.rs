//! Theme path construction.
//!
//! A theme name ends in an optional size token followed by an optional
//! layout letter, right after the closing parenthesis of the style:
//!
//! ```text
//! Semabe Steel Opaque (ambiance)ML
//!                               ^^-- layout letter
//!                               ^--- size token
//! ```
//!
//! The suffix is parsed once by [`NameSuffix::parse`] and the path is
//! assembled from its parts. Nothing before the suffix is ever touched, so
//! colors or transparencies that happen to end in `L` or `S` survive intact.

use crate::constants::THEME_ROOT;
use crate::models::{LayoutLetter, PathLayout, SizeToken, ThemeName, ThemePath, WindowControls};

/// A theme name split into its stem and the parsed suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameSuffix<'a> {
    /// Name without size token and layout letter
    pub stem: &'a str,
    /// Name without the layout letter only
    pub sized_stem: &'a str,
    /// Trailing size token, if any
    pub size: Option<SizeToken>,
    /// Trailing layout letter, if any
    pub layout: Option<LayoutLetter>,
}

impl<'a> NameSuffix<'a> {
    /// Parses the suffix of `name`.
    ///
    /// The suffix region starts after the last `)`; a name without one is
    /// scanned from its end. The layout letter is read first, then the size
    /// token from what remains.
    #[must_use]
    pub fn parse(name: &'a str) -> Self {
        let suffix_start = name.rfind(')').map_or(0, |idx| idx + 1);
        let (head, tail) = name.split_at(suffix_start);

        let (sized_tail, layout) = match tail.chars().last().and_then(LayoutLetter::from_char) {
            Some(letter) => (&tail[..tail.len() - 1], Some(letter)),
            None => (tail, None),
        };

        let (bare_tail, size) = match SizeToken::strip_suffix(sized_tail) {
            Some((rest, size)) => (rest, Some(size)),
            None => (sized_tail, None),
        };

        Self {
            stem: &name[..head.len() + bare_tail.len()],
            sized_stem: &name[..head.len() + sized_tail.len()],
            size,
            layout,
        }
    }

    /// Size directory named by the suffix, `large` when absent.
    #[must_use]
    pub fn size_dir(&self) -> &'static str {
        self.size.unwrap_or_default().dir_name()
    }

    /// Layout directory named by the suffix, `right` when absent.
    #[must_use]
    pub fn layout_dir(&self) -> &'static str {
        self.layout.unwrap_or_default().dir_name()
    }
}

/// Builds the relative directory of `name` for a theme of `style`.
#[must_use]
pub fn build_path(name: &ThemeName, style: WindowControls) -> ThemePath {
    let suffix = NameSuffix::parse(name.as_str());

    match style.path_layout() {
        PathLayout::Flat => ThemePath::from_segments(&[THEME_ROOT, style.as_str(), suffix.stem]),
        PathLayout::SizeBucketed => ThemePath::from_segments(&[
            THEME_ROOT,
            style.as_str(),
            suffix.size_dir(),
            suffix.sized_stem,
        ]),
        PathLayout::LayoutAndSizeBucketed => ThemePath::from_segments(&[
            THEME_ROOT,
            style.as_str(),
            suffix.layout_dir(),
            suffix.size_dir(),
            name.as_str(),
        ]),
    }
}
