//! Display widths and how edit-line characters are painted.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::ControlCharStyle;

/// Terminal cells taken by `c`. Control characters count as zero.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cells taken by `s`, one grapheme at a time. ANSI CSI sequences take
/// no room.
pub fn str_width(s: &str) -> usize {
    strip_csi(s)
        .graphemes(true)
        .map(|g| g.width().min(2))
        .sum()
}

fn strip_csi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&c) {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// The longest prefix of `s` at most `max` cells wide, and its width.
pub(crate) fn truncate(s: &str, max: usize) -> (&str, usize) {
    let mut width = 0;
    for (i, g) in s.grapheme_indices(true) {
        let w = g.width().min(2);
        if width + w > max {
            return (&s[..i], width);
        }
        width += w;
    }
    (s, width)
}

/// What the renderer sends for one edit-line character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Glyph {
    /// Printed as-is, taking this many cells.
    Text(char, usize),
    /// Printed as a sequence of one-cell ASCII characters.
    Escaped(String),
    /// A control character sent literally.
    Control(char),
}

pub(crate) fn glyph(c: char, style: ControlCharStyle) -> Glyph {
    let is_c0 = (c as u32) < 0x20 || c == '\x7f';
    match (c.width(), style) {
        (Some(w), _) => Glyph::Text(c, w),
        (None, ControlCharStyle::Literal) if is_c0 => Glyph::Control(c),
        (None, _) if is_c0 => Glyph::Escaped(format!("^{}", char::from((c as u8) ^ 0x40))),
        (None, _) => Glyph::Escaped(format!("<U+{:04X}>", c as u32)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_characters_escape() {
        assert_eq!(
            glyph('\x01', ControlCharStyle::Escaped),
            Glyph::Escaped("^A".into())
        );
        assert_eq!(
            glyph('\x7f', ControlCharStyle::Escaped),
            Glyph::Escaped("^?".into())
        );
        assert_eq!(
            glyph('\u{85}', ControlCharStyle::Escaped),
            Glyph::Escaped("<U+0085>".into())
        );
        assert_eq!(glyph('\r', ControlCharStyle::Literal), Glyph::Control('\r'));
    }

    #[test]
    fn wide_and_styled_widths() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('日'), 2);
        assert_eq!(str_width("\x1b[1;32m$\x1b[0m "), 2);
        assert_eq!(truncate("日本語", 5), ("日本", 4));
    }
}
