// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Built-in Helvetica: WinAnsi encoding and glyph advance widths.
//
// The standard-14 fonts carry no glyph data, so a viewer maps every byte of a
// `Tj` string through the font's `/WinAnsiEncoding`. Text must therefore be
// encoded to those single bytes, and measured with the font's own AFM widths
// to wrap correctly.

/// Byte substituted for characters WinAnsi cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 0.3528;

/// Code points of WinAnsi bytes 0x80..=0x9F. Zero marks an unassigned byte.
const WIN_ANSI_HIGH: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, //
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017D, 0, //
    0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, //
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
];

/// Helvetica advance widths for ASCII 0x20..=0x7E, in 1/1000 em.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica advance widths for WinAnsi bytes 0x80..=0x9F.
const HIGH_WIDTHS: [u16; 32] = [
    556, 556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 556, 611, 556, //
    556, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 556, 500, 667,
];

/// Helvetica advance widths for Latin-1 0xA0..=0xFF.
const LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, //
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, //
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, //
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, //
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// WinAnsi byte for `c`, if the encoding has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&mapped| mapped != 0 && u32::from(mapped) == code)
            .map(|offset| 0x80 + offset as u8),
    }
}

/// Encode `text` for a `Tj` operand under WinAnsiEncoding. Control characters
/// and characters outside the encoding become [`REPLACEMENT`].
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(REPLACEMENT))
        .collect()
}

/// Advance width of `c` in Helvetica, in 1/1000 em. Characters that encode as
/// [`REPLACEMENT`] are measured as that glyph.
pub fn helvetica_width(c: char) -> u16 {
    let byte = win_ansi_byte(c).unwrap_or(REPLACEMENT);
    match byte {
        0x20..=0x7E => ASCII_WIDTHS[usize::from(byte - 0x20)],
        0x80..=0x9F => HIGH_WIDTHS[usize::from(byte - 0x80)],
        0xA0..=0xFF => LATIN1_WIDTHS[usize::from(byte - 0xA0)],
        _ => ASCII_WIDTHS[usize::from(REPLACEMENT - 0x20)],
    }
}

/// Width of `c` in millimetres at `font_size_pt`.
pub fn char_width_mm(c: char, font_size_pt: f32) -> f32 {
    f32::from(helvetica_width(c)) / 1000.0 * font_size_pt * MM_PER_PT
}

/// Width of `text` in millimetres at `font_size_pt`.
pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    text.chars().map(|c| char_width_mm(c, font_size_pt)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_and_typographic_punctuation_encode_to_single_bytes() {
        assert_eq!(encode_win_ansi("Grüße"), b"Gr\xFC\xDFe");
        assert_eq!(
            encode_win_ansi("\u{201C}a\u{201D} \u{2018}b\u{2019} \u{2013} \u{2014} \u{2026} \u{20AC}"),
            b"\x93a\x94 \x91b\x92 \x96 \x97 \x85 \x80"
        );
    }

    #[test]
    fn unencodable_characters_become_question_marks() {
        assert_eq!(encode_win_ansi("日本 ok\u{7}"), b"?? ok?");
        assert_eq!(win_ansi_byte('\u{81}'), None);
    }

    #[test]
    fn widths_follow_the_helvetica_metrics() {
        assert_eq!(helvetica_width(' '), 278);
        assert_eq!(helvetica_width('W'), 944);
        assert_eq!(helvetica_width('i'), 222);
        assert_eq!(helvetica_width('~'), 584);
        assert_eq!(helvetica_width('\u{2014}'), 1000);
        assert_eq!(helvetica_width('é'), 556);
        assert_eq!(helvetica_width('Æ'), 1000);
        assert_eq!(helvetica_width('日'), helvetica_width('?'));
    }

    #[test]
    fn text_width_scales_with_font_size() {
        let at_ten = text_width_mm("Hello", 10.0);
        assert!((text_width_mm("Hello", 20.0) - 2.0 * at_ten).abs() < 1e-4);
        // H e l l o = 722 + 556 + 222 + 222 + 556
        assert!((at_ten - 2.278 * 10.0 * MM_PER_PT).abs() < 1e-3);
    }
}
