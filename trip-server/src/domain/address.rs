//! Free-text trip endpoints.

use std::fmt;

/// Country suffix appended by place autocomplete that the directions
/// provider resolves to the wrong location.
const COUNTRY_SUFFIX: &str = ", USA";

/// Error returned when an address is empty after normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid address: {reason}")]
pub struct InvalidAddress {
    reason: &'static str,
}

/// Strip a trailing `", USA"` and surrounding whitespace from an address.
///
/// Anything else is passed through untouched; the provider does its own
/// geocoding and is the authority on whether an address exists.
///
/// # Examples
///
/// ```
/// use trip_server::domain::normalize_address;
///
/// assert_eq!(normalize_address("123 Main St, USA"), "123 Main St");
/// assert_eq!(normalize_address("200 Ocean Blvd"), "200 Ocean Blvd");
/// ```
pub fn normalize_address(input: &str) -> String {
    let trimmed = input.trim();
    trimmed
        .strip_suffix(COUNTRY_SUFFIX)
        .unwrap_or(trimmed)
        .trim_end()
        .to_string()
}

/// A normalized, non-empty start or end location.
///
/// Either a street address / place name or a `"lat,lng"` string; the
/// provider accepts both in the same field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Normalize and validate a user-supplied location.
    pub fn parse(input: &str) -> Result<Self, InvalidAddress> {
        let normalized = normalize_address(input);
        if normalized.is_empty() {
            return Err(InvalidAddress {
                reason: "must not be empty",
            });
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_country_suffix() {
        assert_eq!(normalize_address("123 Main St, USA"), "123 Main St");
        assert_eq!(
            normalize_address("1 World Way, Long Beach, CA 90808, USA"),
            "1 World Way, Long Beach, CA 90808"
        );
    }

    #[test]
    fn leaves_other_addresses_alone() {
        assert_eq!(normalize_address("200 Ocean Blvd"), "200 Ocean Blvd");
        assert_eq!(normalize_address("33.77,-118.19"), "33.77,-118.19");
    }

    #[test]
    fn only_trailing_suffix_is_removed() {
        assert_eq!(
            normalize_address("USA Plaza, USA Way"),
            "USA Plaza, USA Way"
        );
        assert_eq!(
            normalize_address("10 First St, USA, Building 2"),
            "10 First St, USA, Building 2"
        );
    }

    #[test]
    fn suffix_is_case_sensitive() {
        assert_eq!(normalize_address("5 Elm St, usa"), "5 Elm St, usa");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(normalize_address("  123 Main St, USA  "), "123 Main St");
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(Address::parse("").is_err());
        assert!(Address::parse("   ").is_err());
        assert!(Address::parse(", USA").is_err());
    }

    #[test]
    fn parse_keeps_normalized_text() {
        let addr = Address::parse("100 Main St, USA").unwrap();
        assert_eq!(addr.as_str(), "100 Main St");
        assert_eq!(addr.to_string(), "100 Main St");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Input that does not end in the suffix is only trimmed
        #[test]
        fn unsuffixed_input_only_trimmed(
            s in "[ A-Za-z0-9,.#-]{0,40}".prop_filter("no suffix", |s| !s.trim().ends_with(", USA"))
        ) {
            prop_assert_eq!(normalize_address(&s), s.trim());
        }

        /// Appending the suffix to a clean address round-trips to the address
        #[test]
        fn suffix_removed(s in "[A-Za-z0-9][A-Za-z0-9 .#-]{0,30}[A-Za-z0-9]") {
            let with_suffix = format!("{s}, USA");
            prop_assert_eq!(normalize_address(&with_suffix), s);
        }
    }
}
