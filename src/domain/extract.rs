// Contribution count extraction from the profile fragment
use crate::domain::error::ProgressError;
use crate::domain::model::Extraction;
use crate::domain::traits::CountExtractor;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n\t\r ]+").unwrap());

static CONTRIBUTIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9,]+)\s+contributions\s+in\s+([0-9]{4})").unwrap());

/// Collapse runs of newlines, tabs, carriage returns and spaces into one space, then trim.
pub fn normalize(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").trim().to_string()
}

/// Matches `"1,234 contributions in 2023"` anywhere in the normalized document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContributionsPattern;

impl CountExtractor for ContributionsPattern {
    fn extract(&self, raw: &str) -> Result<Extraction, ProgressError> {
        let text = normalize(raw);
        let caps = CONTRIBUTIONS
            .captures(&text)
            .ok_or(ProgressError::NoMatch)?;

        let digits: String = caps[1].chars().filter(|c| *c != ',').collect();
        // "," alone satisfies the character class but carries no number
        let count = digits
            .parse::<u64>()
            .map_err(|_| ProgressError::NoMatch)?;
        let year = caps.get(2).and_then(|m| m.as_str().parse::<i32>().ok());

        Ok(Extraction { count, year })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_mixed_whitespace() {
        assert_eq!(normalize("\n\t  a \r\n\t b   c  \n"), "a b c");
    }

    #[test]
    fn test_extract_matched_year() {
        let got = ContributionsPattern
            .extract("<h2>12 contributions in 2021</h2>")
            .unwrap();
        assert_eq!(got.count, 12);
        assert_eq!(got.year, Some(2021));
    }

    #[test]
    fn test_extract_case_insensitive() {
        let got = ContributionsPattern
            .extract("3 Contributions In 2020")
            .unwrap();
        assert_eq!(got.count, 3);
    }

    #[test]
    fn test_extract_separators_only() {
        let err = ContributionsPattern
            .extract(", contributions in 2020")
            .unwrap_err();
        assert!(matches!(err, ProgressError::NoMatch));
    }
}
