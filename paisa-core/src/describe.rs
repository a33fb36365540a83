//! Description cleanup: strip amount and currency tokens out of the
//! prompt, falling back to a category-derived label.

use anyhow::Result;
use regex::Regex;

/// Cleans prompts into display descriptions.
#[derive(Debug)]
pub struct Describer {
    amount_tokens: Regex,
    currency_symbols: Regex,
}

impl Describer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // A number with an optional currency marker on either side.
            // Bare numbers are stripped too, so an amount found by the
            // bare-number fallback never leaks into the description.
            amount_tokens: Regex::new(
                r"(?i)(?:(?:rupees?|rs\.?|dollars?|₹|\$)\s*)?\d+(?:\.\d+)?(?:\s*(?:rupees?|rs\.?|dollars?|₹|\$))?",
            )?,
            currency_symbols: Regex::new(r"[₹$]")?,
        })
    }

    /// Clean `text` for display. `category` feeds the fallback label
    /// used when fewer than 3 characters survive the stripping.
    pub fn describe(&self, text: &str, category: &str) -> String {
        let cleaned = self.amount_tokens.replace_all(text, "");
        let cleaned = self.currency_symbols.replace_all(&cleaned, "");
        let cleaned = cleaned.trim();

        if cleaned.chars().count() < 3 {
            return format!("{} expense", title_case(&category.replace('_', " ")));
        }
        capitalize(cleaned)
    }
}

/// First character uppercased, the rest lowercased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describer() -> Describer {
        Describer::new().unwrap()
    }

    #[test]
    fn test_strips_amount_with_trailing_currency_word() {
        let d = describer();
        assert_eq!(d.describe("200 rupees lunch at cafe", "food"), "Lunch at cafe");
        assert_eq!(d.describe("4.5 dollars coffee downtown", "food"), "Coffee downtown");
    }

    #[test]
    fn test_strips_symbol_before_number() {
        let d = describer();
        assert_eq!(d.describe("₹500 uber to airport", "travel"), "Uber to airport");
        assert_eq!(d.describe("$30 movie night", "fun"), "Movie night");
    }

    #[test]
    fn test_strips_bare_amount() {
        let d = describer();
        assert_eq!(d.describe("rent 12000", "room_expense"), "Rent");
    }

    #[test]
    fn test_short_remainder_falls_back_to_category_label() {
        let d = describer();
        assert_eq!(d.describe("₹500", "room_expense"), "Room Expense expense");
        assert_eq!(d.describe("12000 rs", "miscellaneous"), "Miscellaneous expense");
    }

    #[test]
    fn test_capitalizes_first_character_only() {
        // Remainder keeps its word order; everything after the first
        // character is lowercased, not title-cased.
        let d = describer();
        assert_eq!(d.describe("200 rupees LUNCH at CAFE", "food"), "Lunch at cafe");
    }

    #[test]
    fn test_no_currency_or_amount_token_survives() {
        let d = describer();
        for prompt in [
            "200 rupees lunch at cafe",
            "₹500 uber to airport",
            "rent 12000",
            "$12.50 coffee and 3 dollars tip",
            "rs. 80 bus ticket",
        ] {
            let description = d.describe(prompt, "miscellaneous");
            assert!(!description.contains('₹'), "symbol leaked: {description}");
            assert!(!description.contains('$'), "symbol leaked: {description}");
            assert!(
                !description.chars().any(|c| c.is_ascii_digit()),
                "amount leaked: {description}"
            );
        }
    }

    #[test]
    fn test_fallback_label_title_cases_underscores() {
        let d = describer();
        assert_eq!(d.describe("45", "room_expense"), "Room Expense expense");
        assert_eq!(d.describe("45", "gym"), "Gym expense");
    }
}
