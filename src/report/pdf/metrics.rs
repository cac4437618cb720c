//! Helvetica glyph widths (AFM units per 1000 em) for measuring and wrapping.

const PT_TO_MM: f32 = 25.4 / 72.0;
const DEFAULT_WIDTH: u16 = 556;
const BOLD_FACTOR: f32 = 1.06;

/// Widths for the printable ASCII range, starting at the space character.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

fn glyph_width(ch: char) -> u16 {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        HELVETICA_ASCII[(code - 32) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// Rendered width of `text` in millimetres.
pub fn text_width(text: &str, font_size: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
    let width = units as f32 / 1000.0 * font_size * PT_TO_MM;
    if bold {
        width * BOLD_FACTOR
    } else {
        width
    }
}

/// Baseline-to-baseline distance used for wrapped lines.
pub fn line_height(font_size: f32) -> f32 {
    font_size * PT_TO_MM * 1.15
}

/// Greedy word wrap. Words wider than the line are split by character.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, font_size, bold) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width(word, font_size, bold) <= max_width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    let mut next = current.clone();
                    next.push(ch);
                    if !current.is_empty() && text_width(&next, font_size, bold) > max_width {
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    } else {
                        current = next;
                    }
                }
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Width of the longest single word, the narrowest a column may become.
pub fn longest_word_width(text: &str, font_size: f32, bold: bool) -> f32 {
    text.split_whitespace()
        .map(|w| text_width(w, font_size, bold))
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_scales_with_size() {
        let small = text_width("Tilapia", 8.0, false);
        let large = text_width("Tilapia", 16.0, false);
        assert!((large - small * 2.0).abs() < 1e-4);
        assert!(text_width("Tilapia", 8.0, true) > small);
        assert_eq!(text_width("", 8.0, false), 0.0);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Frozen tilapia fillets shipped via Mombasa with reefer container monitoring";
        let lines = wrap_text(text, 40.0, 10.0, false);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, false) <= 40.0, "{}", line);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap_text("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 10.0, 10.0, false);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }

    #[test]
    fn test_wrap_empty_text_yields_one_line() {
        assert_eq!(wrap_text("", 50.0, 8.0, false), vec![String::new()]);
    }
}
