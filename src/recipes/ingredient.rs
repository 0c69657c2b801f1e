use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// A free-text ingredient line split into name and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedIngredient {
    pub name: Option<String>,
    pub quantity: Option<String>,
}

lazy_static! {
    // Leading quantity: mixed fraction, bare fraction, or integer,
    // optionally followed by a short alphabetic unit, then the name.
    static ref QUANTITY_RE: Regex =
        Regex::new(r"^(\d+\s+\d+/\d+|\d+/\d+|\d+)(?:\s+([A-Za-z]{1,12}))?\s+(\S.*)$").unwrap();
}

/// Splits "2 cups flour" into name "flour" and quantity "2 cups". Lines
/// without a recognizable leading quantity keep the whole trimmed text as
/// the name. Never fails; malformed input degrades to name-only.
pub fn parse_ingredient_line(line: &str) -> ParsedIngredient {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ParsedIngredient {
            name: None,
            quantity: None,
        };
    }

    if let Some(caps) = QUANTITY_RE.captures(trimmed) {
        let qty = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let name = caps
            .get(3)
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        if !name.is_empty() {
            let quantity = match caps.get(2) {
                Some(unit) => format!("{} {}", qty, unit.as_str()),
                None => qty.to_string(),
            };
            return ParsedIngredient {
                name: Some(name.to_string()),
                quantity: Some(quantity),
            };
        }
    }

    // Quantity-only or unrecognized: the whole line is the name.
    ParsedIngredient {
        name: Some(trimmed.to_string()),
        quantity: None,
    }
}
