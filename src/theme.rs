//! Colour and typography presets for the developer theme switcher.

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;
use crate::error::SiteError;

pub type StyleVars = &'static [(&'static str, &'static str)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: StyleVars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub vars: StyleVars,
    /// Web-font families to fetch when this preset is picked.
    pub families: &'static [&'static str],
}

pub const THEMES: &[ThemePreset] = &[
    ThemePreset {
        id: "vanguard",
        name: "Vanguard (Default)",
        colors: &[
            ("--bg-color", "#050505"),
            ("--text-color", "#e0e0e0"),
            ("--accent-color", "#ff3333"),
            ("--nav-bg", "rgba(5, 5, 5, 0.8)"),
            ("--border-color", "rgba(255, 255, 255, 0.1)"),
            ("--bg-secondary", "#0a0a0a"),
            ("--text-muted", "rgba(255, 255, 255, 0.1)"),
            ("--bg-footer", "#020202"),
        ],
    },
    ThemePreset {
        id: "neon-cyber",
        name: "Neon Cyber",
        colors: &[
            ("--bg-color", "#0a0a12"),
            ("--text-color", "#00f3ff"),
            ("--accent-color", "#ff00ff"),
            ("--nav-bg", "rgba(10, 10, 18, 0.8)"),
            ("--border-color", "rgba(0, 243, 255, 0.2)"),
            ("--bg-secondary", "#0f0f1a"),
            ("--text-muted", "rgba(0, 243, 255, 0.1)"),
            ("--bg-footer", "#05050a"),
        ],
    },
    ThemePreset {
        id: "luxury-gold",
        name: "Luxury Gold",
        colors: &[
            ("--bg-color", "#1a1a1a"),
            ("--text-color", "#d4af37"),
            ("--accent-color", "#ffffff"),
            ("--nav-bg", "rgba(26, 26, 26, 0.8)"),
            ("--border-color", "rgba(212, 175, 55, 0.2)"),
            ("--bg-secondary", "#222222"),
            ("--text-muted", "rgba(212, 175, 55, 0.1)"),
            ("--bg-footer", "#111111"),
        ],
    },
    ThemePreset {
        id: "swiss-minimal",
        name: "Swiss Minimal",
        colors: &[
            ("--bg-color", "#ffffff"),
            ("--text-color", "#000000"),
            ("--accent-color", "#ff3333"),
            ("--nav-bg", "rgba(255, 255, 255, 0.8)"),
            ("--border-color", "rgba(0, 0, 0, 0.1)"),
            ("--bg-secondary", "#f4f4f4"),
            ("--text-muted", "#444444"),
            ("--bg-footer", "#f0f0f0"),
        ],
    },
    ThemePreset {
        id: "dark-nature",
        name: "Dark Nature",
        colors: &[
            ("--bg-color", "#1c1f1a"),
            ("--text-color", "#e8f5e9"),
            ("--accent-color", "#4caf50"),
            ("--nav-bg", "rgba(28, 31, 26, 0.8)"),
            ("--border-color", "rgba(232, 245, 233, 0.1)"),
            ("--bg-secondary", "#252922"),
            ("--text-muted", "rgba(232, 245, 233, 0.1)"),
            ("--bg-footer", "#151813"),
        ],
    },
];

pub const FONTS: &[FontPreset] = &[
    FontPreset {
        id: "default",
        name: "Cinzel + Syncopate",
        vars: &[
            ("--font-serif", "\"Cinzel\", serif"),
            ("--font-sans", "\"Syncopate\", sans-serif"),
        ],
        families: &[],
    },
    FontPreset {
        id: "modern",
        name: "Playfair + Montserrat",
        vars: &[
            ("--font-serif", "\"Playfair Display\", serif"),
            ("--font-sans", "\"Montserrat\", sans-serif"),
        ],
        families: &["Playfair Display", "Montserrat"],
    },
    FontPreset {
        id: "tech",
        name: "Orbitron + Roboto Mono",
        vars: &[
            ("--font-serif", "\"Orbitron\", sans-serif"),
            ("--font-sans", "\"Roboto Mono\", monospace"),
        ],
        families: &["Orbitron", "Roboto Mono"],
    },
    FontPreset {
        id: "classic",
        name: "Bodoni + Helvetica",
        vars: &[
            ("--font-serif", "\"Bodoni Moda\", serif"),
            ("--font-sans", "\"Helvetica Neue\", Helvetica, Arial, sans-serif"),
        ],
        families: &["Bodoni Moda"],
    },
    FontPreset {
        id: "brutalist",
        name: "Anton + Inter",
        vars: &[
            ("--font-serif", "\"Anton\", sans-serif"),
            ("--font-sans", "\"Inter\", sans-serif"),
        ],
        families: &["Anton", "Inter"],
    },
];

const FONT_CSS_BASE: &str = "https://fonts.googleapis.com/css2";

/// Stylesheet URL for a web-font family, spaces joined with `+`.
pub fn font_stylesheet_url(family: &str) -> String {
    let family = family
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+");
    format!("{}?family={}:wght@400;700&display=swap", FONT_CSS_BASE, family)
}

/// The document's root element, where every preset variable lives.
#[derive(Debug, Clone, PartialEq)]
pub struct RootStyle {
    root: HtmlElement,
}

impl RootStyle {
    pub fn document() -> Result<Self, SiteError> {
        let root = dom::document()?
            .document_element()
            .ok_or(SiteError::MissingElement("html"))?
            .unchecked_into::<HtmlElement>();
        Ok(Self { root })
    }

    /// Overwrites each variable; variables not in `vars` are left alone.
    pub fn apply(&self, vars: StyleVars) {
        for (name, value) in vars {
            dom::set_style(&self.root, name, value);
        }
    }

    pub fn apply_theme(&self, theme: &ThemePreset) {
        debug!("Applying theme {}", theme.id);
        self.apply(theme.colors);
    }

    pub fn apply_font(&self, font: &FontPreset) {
        debug!("Applying font preset {}", font.id);
        self.apply(font.vars);
        for family in font.families {
            if let Err(err) = load_font(family) {
                warn!("Could not load font {}: {}", family, err);
            }
        }
    }
}

/// Appends a stylesheet link for `family` unless one is already present.
pub fn load_font(family: &str) -> Result<(), SiteError> {
    let document = dom::document()?;
    let href = font_stylesheet_url(family);
    let selector = format!("link[href=\"{}\"]", href);
    if document.query_selector(&selector)?.is_some() {
        return Ok(());
    }
    let head = document.head().ok_or(SiteError::MissingElement("head"))?;
    let link = document.create_element("link")?;
    link.set_attribute("rel", "stylesheet")?;
    link.set_attribute("href", &href)?;
    head.append_child(&link)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn preset_ids_are_unique() {
        let themes: HashSet<_> = THEMES.iter().map(|t| t.id).collect();
        assert_eq!(themes.len(), THEMES.len());
        let fonts: HashSet<_> = FONTS.iter().map(|f| f.id).collect();
        assert_eq!(fonts.len(), FONTS.len());
    }

    #[test]
    fn every_theme_sets_the_same_variables() {
        let expected: Vec<_> = THEMES[0].colors.iter().map(|(name, _)| *name).collect();
        for theme in THEMES {
            let names: Vec<_> = theme.colors.iter().map(|(name, _)| *name).collect();
            assert_eq!(names, expected, "{}", theme.id);
        }
    }

    #[test]
    fn only_the_default_font_preset_loads_nothing() {
        let loading: Vec<_> = FONTS.iter().filter(|f| f.families.is_empty()).map(|f| f.id).collect();
        assert_eq!(loading, vec!["default"]);
        assert_eq!(FONTS[4].families, &["Anton", "Inter"]);
        assert_eq!(THEMES[1].name, "Neon Cyber");
    }

    #[test]
    fn font_urls_join_words_with_plus() {
        assert_eq!(
            font_stylesheet_url("Playfair Display"),
            "https://fonts.googleapis.com/css2?family=Playfair+Display:wght@400;700&display=swap"
        );
        assert_eq!(
            font_stylesheet_url("Inter"),
            "https://fonts.googleapis.com/css2?family=Inter:wght@400;700&display=swap"
        );
    }
}
