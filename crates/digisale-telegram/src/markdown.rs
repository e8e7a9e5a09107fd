// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MarkdownV2 escaping for Telegram Bot API.
//!
//! Telegram's MarkdownV2 parse mode requires escaping 18 special characters.
//! Digisale replies never carry code spans, so a flat escape is enough;
//! formatting characters are added after escaping the dynamic parts.

/// Characters that must be escaped in MarkdownV2.
const SPECIAL_CHARS: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes text for Telegram MarkdownV2 parse mode.
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        if SPECIAL_CHARS.contains(&ch) {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_dates_and_amounts() {
        assert_eq!(escape("2026-03-15"), "2026\\-03\\-15");
        assert_eq!(escape("5000.00 Ks"), "5000\\.00 Ks");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape("Total Sales"), "Total Sales");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn every_special_char_is_escaped() {
        for &ch in SPECIAL_CHARS {
            let escaped = escape(&ch.to_string());
            assert_eq!(escaped, format!("\\{ch}"));
        }
    }
}
