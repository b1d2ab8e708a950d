use std::borrow::Cow;

use rust_decimal::{Decimal, RoundingStrategy};

/// Escapes text for use in element content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

pub(crate) fn money(symbol: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{rounded:.2}", escape(symbol))
}

/// Five-star strip, filled up to `rating`.
pub(crate) fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!(
        "<span class=\"rating\" aria-label=\"{filled} out of 5\">{}{}</span>",
        "★".repeat(filled),
        "☆".repeat(5 - filled)
    )
}

pub(crate) fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

pub(crate) fn selected(on: bool) -> &'static str {
    if on {
        " selected"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_leaves_plain_text_borrowed() {
        assert!(matches!(escape("Sony WH-1000XM5"), Cow::Borrowed(_)));
    }

    #[test]
    fn escape_replaces_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn money_always_has_two_decimals() {
        assert_eq!(money("$", Decimal::new(349, 0)), "$349.00");
        assert_eq!(money("€", Decimal::new(12_345, 3)), "€12.35");
    }

    #[test]
    fn stars_clamp_to_five() {
        assert!(stars(7).contains("★★★★★<"));
        assert!(stars(0).contains("☆☆☆☆☆"));
    }
}
