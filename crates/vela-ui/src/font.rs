//! Font descriptors and system font-set resolution.
//!
//! A [`Font`] describes what the UI asked for (family list, size, weight,
//! style); resolving it against the fonts actually installed on the device
//! goes through [`SystemFontSets`], a process-wide cache of installed family
//! and face names. The cache carries an explicit validity flag: hosts
//! populate it with [`SystemFontSets::refresh`] and call
//! [`SystemFontSets::invalidate`] when the installed set changes (e.g. after
//! registering a custom font), rather than relying on lazy initialization.

use std::collections::HashSet;

use tracing::debug;

const DEFAULT_SERIF: &str = "Times New Roman";
const DEFAULT_SANS_SERIF: &str = "Helvetica";
const DEFAULT_MONOSPACE: &str = "Courier New";

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// An immutable font request.
///
/// `family` accepts a comma-separated list with optional quoting, CSS-style:
/// `"Avenir Next, 'Helvetica Neue', sans-serif"`. Absent fields fall back to
/// the platform default font.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Font {
    pub family: Option<String>,
    pub size: Option<f64>,
    pub style: FontStyle,
    pub weight: FontWeight,
}

impl Font {
    pub fn new(
        family: Option<String>,
        size: Option<f64>,
        style: FontStyle,
        weight: FontWeight,
    ) -> Self {
        Self {
            family,
            size,
            style,
            weight,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.style == FontStyle::Italic
    }

    pub fn with_family(&self, family: impl Into<String>) -> Self {
        Self {
            family: Some(family.into()),
            ..self.clone()
        }
    }

    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size: Some(size),
            ..self.clone()
        }
    }

    pub fn with_style(&self, style: FontStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }

    pub fn with_weight(&self, weight: FontWeight) -> Self {
        Self {
            weight,
            ..self.clone()
        }
    }
}

/// Split a CSS-style font-family list into individual names.
///
/// Surrounding quotes (single or double) are stripped and whitespace is
/// trimmed; empty segments are dropped.
pub fn parse_font_family(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Map generic family names to the platform's concrete defaults.
fn concrete_family(family: &str) -> &str {
    match family.to_ascii_lowercase().as_str() {
        "serif" => DEFAULT_SERIF,
        "sans-serif" => DEFAULT_SANS_SERIF,
        "monospace" => DEFAULT_MONOSPACE,
        _ => family,
    }
}

/// Enumerates installed fonts on behalf of [`SystemFontSets`].
///
/// Platform integrations back this with the native font registry; tests use
/// a fixed in-memory listing.
pub trait FontProvider {
    /// Installed family names.
    fn families(&self) -> Vec<String>;
    /// Installed face (PostScript) names for one family.
    fn faces(&self, family: &str) -> Vec<String>;
}

/// Result of resolving a family list against the installed sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontMatch {
    /// Matched a family name; symbolic traits (bold/italic) may be applied.
    Family(String),
    /// Matched a concrete face; traits are baked in and must not be applied.
    Face(String),
}

/// Cache of installed font family and face names.
#[derive(Debug, Default)]
pub struct SystemFontSets {
    families: HashSet<String>,
    faces: HashSet<String>,
    valid: bool,
}

impl SystemFontSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cached sets reflect the current platform state.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Repopulate the sets from the platform and mark them valid.
    pub fn refresh(&mut self, provider: &dyn FontProvider) {
        self.families.clear();
        self.faces.clear();
        for family in provider.families() {
            for face in provider.faces(&family) {
                self.faces.insert(face);
            }
            self.families.insert(family);
        }
        self.valid = true;
        debug!(
            families = self.families.len(),
            faces = self.faces.len(),
            "system font sets refreshed"
        );
    }

    /// Mark the sets stale. Call after fonts are registered or removed;
    /// the next resolution requires a [`refresh`](Self::refresh).
    pub fn invalidate(&mut self) {
        self.valid = false;
        debug!("system font sets invalidated");
    }

    /// Resolve a family list to the first installed match.
    ///
    /// Returns `None` when the sets are stale or nothing in the list is
    /// installed. Generic names (`serif`, `sans-serif`, `monospace`) are
    /// mapped to the platform defaults before lookup.
    pub fn resolve(&self, family_value: &str) -> Option<FontMatch> {
        if !self.valid {
            return None;
        }
        for requested in parse_font_family(family_value) {
            let name = concrete_family(&requested);
            if self.families.contains(name) {
                return Some(FontMatch::Family(name.to_string()));
            }
            if self.faces.contains(name) {
                return Some(FontMatch::Face(name.to_string()));
            }
        }
        None
    }
}
