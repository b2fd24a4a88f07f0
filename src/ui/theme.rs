//! Neon theme for popstream
//!
//! Color palette and style helpers for the TUI: a violet/fuchsia glow over a
//! near-black background.

use ratatui::style::{Color, Modifier, Style};

use crate::models::ContentKind;

/// Neon color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0d0c0f (near black)
    pub const BACKGROUND: Color = Color::Rgb(0x0d, 0x0c, 0x0f);

    /// Primary: #a78bfa (violet glow)
    pub const PRIMARY: Color = Color::Rgb(0xa7, 0x8b, 0xfa);

    /// Secondary: #e879f9 (fuchsia)
    pub const SECONDARY: Color = Color::Rgb(0xe8, 0x79, 0xf9);

    /// Accent: #22d3ee (cyan)
    pub const ACCENT: Color = Color::Rgb(0x22, 0xd3, 0xee);

    /// Highlight: #ff4d8d (hot pink)
    pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0x4d, 0x8d);

    /// Text: #ededed (soft white)
    pub const TEXT: Color = Color::Rgb(0xed, 0xed, 0xed);

    /// Dim: #8a8796 (muted)
    pub const DIM: Color = Color::Rgb(0x8a, 0x87, 0x96);

    /// Success: #4ade80 (green)
    pub const SUCCESS: Color = Color::Rgb(0x4a, 0xde, 0x80);

    /// Warning: #fbbf24 (amber)
    pub const WARNING: Color = Color::Rgb(0xfb, 0xbf, 0x24);

    /// Error: #f87171 (red)
    pub const ERROR: Color = Color::Rgb(0xf8, 0x71, 0x71);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Panels, the search field and the bars
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x17, 0x15, 0x1c);

    /// Empty image placeholder block
    pub const PLACEHOLDER: Color = Color::Rgb(0x26, 0x23, 0x2e);

    /// Border color (dim violet)
    pub const BORDER: Color = Color::Rgb(0x4c, 0x3d, 0x80);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Highlighted text (inverted with primary color)
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style (hot pink, bold)
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Large hero title
    pub fn hero_title() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border (glowing effect)
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    pub fn list_item() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Style for input cursor
    pub fn input_cursor() -> Style {
        Style::default().fg(Self::BACKGROUND).bg(Self::PRIMARY)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Keybinding description style
    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Top/bottom bar background
    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Current nav entry
    pub fn nav_active() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn nav_inactive() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Loading/spinner indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn date() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Kind badge; series and movies get different glows
    pub fn badge(kind: ContentKind) -> Style {
        let fg = match kind {
            ContentKind::Movie => Self::SECONDARY,
            ContentKind::Series => Self::ACCENT,
        };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    /// "Featured Film" pill on the hero
    pub fn hero_badge() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Filled thumbnail marker
    pub fn thumbnail() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Empty thumbnail placeholder
    pub fn placeholder() -> Style {
        Style::default().fg(Self::PLACEHOLDER)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Calculate contrast ratio between two colors
/// Returns a value between 1 (same color) and 21 (black/white)
/// WCAG AA requires >= 4.5:1 for normal text, >= 3:1 for large text
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Check if a foreground/background pair meets WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// Check if a foreground/background pair meets WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("Theme colors should all be RGB")
    }

    const FOREGROUNDS: [Color; 9] = [
        Theme::PRIMARY,
        Theme::SECONDARY,
        Theme::ACCENT,
        Theme::HIGHLIGHT,
        Theme::TEXT,
        Theme::DIM,
        Theme::SUCCESS,
        Theme::WARNING,
        Theme::ERROR,
    ];

    #[test]
    fn test_all_theme_colors_are_rgb() {
        assert!(color_to_rgb(Theme::BACKGROUND).is_some());
        for color in FOREGROUNDS {
            assert!(color_to_rgb(color).is_some());
        }
    }

    #[test]
    fn test_palette_values() {
        assert_eq!(rgb(Theme::BACKGROUND), (0x0d, 0x0c, 0x0f));
        assert_eq!(rgb(Theme::SECONDARY), (0xe8, 0x79, 0xf9));
        assert_eq!(rgb(Theme::TEXT), (0xed, 0xed, 0xed));
    }

    #[test]
    fn test_text_contrast_against_background() {
        let bg = rgb(Theme::BACKGROUND);
        let ratio = contrast_ratio(rgb(Theme::TEXT), bg);
        assert!(
            meets_wcag_aa(rgb(Theme::TEXT), bg),
            "Text on background should meet WCAG AA (got {:.2}:1)",
            ratio
        );
    }

    #[test]
    fn test_dim_text_still_readable() {
        let bg = rgb(Theme::BACKGROUND);
        let ratio = contrast_ratio(rgb(Theme::DIM), bg);
        assert!(meets_wcag_aa(rgb(Theme::DIM), bg), "dim text at {:.2}:1", ratio);
    }

    #[test]
    fn test_foregrounds_meet_large_text_contrast() {
        let bg = rgb(Theme::BACKGROUND);
        for color in FOREGROUNDS {
            let ratio = contrast_ratio(rgb(color), bg);
            assert!(
                meets_wcag_aa_large(rgb(color), bg),
                "{:?} on background at {:.2}:1",
                color,
                ratio
            );
        }
    }

    #[test]
    fn test_inverted_styles_readable() {
        let fg = rgb(Theme::BACKGROUND);
        assert!(meets_wcag_aa_large(fg, rgb(Theme::PRIMARY)));
        assert!(meets_wcag_aa_large(fg, rgb(Theme::SECONDARY)));
    }

    #[test]
    fn test_badge_differs_by_kind() {
        assert_ne!(Theme::badge(ContentKind::Movie), Theme::badge(ContentKind::Series));
    }

    #[test]
    fn test_relative_luminance_extremes() {
        assert!(relative_luminance(0, 0, 0).abs() < 0.001);
        assert!((relative_luminance(255, 255, 255) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let ratio = contrast_ratio((100, 100, 100), (100, 100, 100));
        assert!((ratio - 1.0).abs() < 0.001);
    }
}
