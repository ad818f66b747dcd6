//! Fixed, theme-independent deck colors.

use crate::model::Rgb;

/// Summary and table slide background.
pub const SLIDE_BACKGROUND: Rgb = Rgb::new(0xF8, 0xFA, 0xFC);

/// Card and even-row fill.
pub const CARD_FILL: Rgb = Rgb::WHITE;

/// Odd-row fill.
pub const ROW_ALT_FILL: Rgb = Rgb::new(0xF8, 0xFA, 0xFC);

/// Card and row outline.
pub const CARD_BORDER: Rgb = Rgb::new(0xE2, 0xE8, 0xF0);

/// Table header outline.
pub const HEADER_BORDER: Rgb = Rgb::new(0xCB, 0xD5, 0xE1);

/// Headings and first-column text.
pub const TEXT_PRIMARY: Rgb = Rgb::new(0x1E, 0x29, 0x3B);

/// Body text.
pub const TEXT_SECONDARY: Rgb = Rgb::new(0x47, 0x55, 0x69);

/// De-emphasized text (size line, footers).
pub const TEXT_MUTED: Rgb = Rgb::new(0x64, 0x74, 0x8B);
