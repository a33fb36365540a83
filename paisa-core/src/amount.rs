//! Amount extraction: ordered currency-tagged regex rules with a
//! bare-number fallback.

use anyhow::Result;
use regex::Regex;

/// Ordered amount-matching rules.
///
/// Priority is fixed: rupee marker after the number, rupee symbol
/// before it, then the dollar equivalents, then any bare number. The
/// first rule that matches anywhere in the text wins, regardless of
/// where later rules would match.
#[derive(Debug)]
pub struct AmountRules {
    currency_rules: Vec<Regex>,
    bare_number: Regex,
}

impl AmountRules {
    pub fn new() -> Result<Self> {
        let currency_rules = vec![
            Regex::new(r"(\d+(?:\.\d+)?)\s*(?:rupees?|rs\.?|₹)")?,
            Regex::new(r"₹\s*(\d+(?:\.\d+)?)")?,
            Regex::new(r"(\d+(?:\.\d+)?)\s*(?:dollars?|\$)")?,
            Regex::new(r"\$\s*(\d+(?:\.\d+)?)")?,
        ];
        Ok(Self {
            currency_rules,
            bare_number: Regex::new(r"\d+(?:\.\d+)?")?,
        })
    }

    /// Extract a monetary amount from free text, case-insensitively.
    ///
    /// Returns 0.0 when the text contains no number at all; callers
    /// treat that as a failed extraction.
    pub fn extract(&self, text: &str) -> f64 {
        let text = text.to_lowercase();

        for rule in &self.currency_rules {
            if let Some(caps) = rule.captures(&text) {
                if let Ok(value) = caps[1].parse() {
                    return value;
                }
            }
        }

        // No currency marker anywhere: first bare number, left to right.
        self.bare_number
            .find(&text)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> AmountRules {
        AmountRules::new().unwrap()
    }

    #[test]
    fn test_number_before_rupee_word() {
        assert_eq!(rules().extract("200 rupees lunch at cafe"), 200.0);
        assert_eq!(rules().extract("spent 99.5 rupee on snacks"), 99.5);
        assert_eq!(rules().extract("45 rs. auto fare"), 45.0);
    }

    #[test]
    fn test_rupee_symbol_before_number() {
        assert_eq!(rules().extract("₹500 uber to airport"), 500.0);
        assert_eq!(rules().extract("paid ₹ 120.75 for groceries"), 120.75);
    }

    #[test]
    fn test_dollar_forms() {
        assert_eq!(rules().extract("12.5 dollars for coffee"), 12.5);
        assert_eq!(rules().extract("movie night $30"), 30.0);
        assert_eq!(rules().extract("$ 8 parking"), 8.0);
    }

    #[test]
    fn test_rule_order_beats_text_order() {
        // The rupee-word rule outranks the symbol rule even though the
        // symbol appears first in the text.
        assert_eq!(rules().extract("₹500 refund but 20 rupees tip"), 20.0);
    }

    #[test]
    fn test_bare_number_fallback_is_leftmost() {
        assert_eq!(rules().extract("rent 12000"), 12000.0);
        assert_eq!(rules().extract("split 3 ways, paid 250"), 3.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(rules().extract("200 RUPEES LUNCH"), 200.0);
        assert_eq!(rules().extract("5 Dollars tip"), 5.0);
    }

    #[test]
    fn test_no_number_returns_zero() {
        assert_eq!(rules().extract("just chatting"), 0.0);
        assert_eq!(rules().extract(""), 0.0);
    }
}
