//! Identifier casing for generated records.
//!
//! Descriptor labels are free-form ("Address Lookup", "customerName",
//! "CUST-NO"). These helpers split them into words and join the words into
//! valid Rust identifiers.

/// Rust keywords that can be used as raw identifiers.
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["self", "Self", "super", "crate"];

/// Splits a label into words.
///
/// Non-alphanumeric characters separate words, as do lower-to-upper case
/// changes (`customerName`) and the last capital of an acronym followed by a
/// lowercase letter (`MDEntry` gives `MD`, `Entry`).
#[must_use]
pub fn split_words(label: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = label.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase() && c.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Converts a label to PascalCase.
#[must_use]
pub fn to_pascal_case(label: &str) -> String {
    let mut result = String::with_capacity(label.len());
    for word in split_words(label) {
        let all_upper = !word.chars().any(char::is_lowercase);
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            if all_upper {
                result.extend(chars.flat_map(char::to_lowercase));
            } else {
                result.extend(chars);
            }
        }
    }
    result
}

/// Converts a label to snake_case.
#[must_use]
pub fn to_snake_case(label: &str) -> String {
    split_words(label)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Returns the record type identifier for a label.
#[must_use]
pub fn type_identifier(label: &str) -> String {
    escape(to_pascal_case(label), "Record")
}

/// Returns the field identifier for a label.
#[must_use]
pub fn field_identifier(label: &str) -> String {
    escape(to_snake_case(label), "field")
}

/// Returns an identifier without its raw prefix.
#[must_use]
pub fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

fn escape(ident: String, fallback: &str) -> String {
    if ident.is_empty() {
        return fallback.to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{ident}");
    }
    if RESERVED.contains(&ident.as_str()) {
        return format!("{ident}_");
    }
    if RAW_KEYWORDS.contains(&ident.as_str()) {
        return format!("r#{ident}");
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("Address Lookup"), vec!["Address", "Lookup"]);
        assert_eq!(split_words("customerName"), vec!["customer", "Name"]);
        assert_eq!(split_words("MDEntryPx"), vec!["MD", "Entry", "Px"]);
        assert_eq!(split_words("CUST-NO_2"), vec!["CUST", "NO", "2"]);
        assert!(split_words("--").is_empty());
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("message_header"), "MessageHeader");
        assert_eq!(to_pascal_case("Address Lookup"), "AddressLookup");
        assert_eq!(to_pascal_case("ADDR"), "Addr");
        assert_eq!(to_pascal_case("order-type"), "OrderType");
        assert_eq!(to_pascal_case("customerName"), "CustomerName");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("clOrdId"), "cl_ord_id");
        assert_eq!(to_snake_case("symbol"), "symbol");
        assert_eq!(to_snake_case("CUST-NO"), "cust_no");
        assert_eq!(to_snake_case("Zip Code"), "zip_code");
    }

    #[test]
    fn test_identifier_escaping() {
        assert_eq!(field_identifier("type"), "r#type");
        assert_eq!(field_identifier("self"), "self_");
        assert_eq!(field_identifier("2nd line"), "_2nd_line");
        assert_eq!(field_identifier("***"), "field");
        assert_eq!(type_identifier("self"), "Self_");
        assert_eq!(type_identifier(""), "Record");
    }

    #[test]
    fn test_unraw() {
        assert_eq!(unraw("r#type"), "type");
        assert_eq!(unraw("zip"), "zip");
    }
}
