use thiserror::Error;

use crate::docs::TreeNode;

/// Longest accepted search term, in characters, after trimming.
pub const MAX_SEARCH_LEN: usize = 50;

/// Characters rejected anywhere in a search term.
pub const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '\\', '|', '?', '*'];

/// Whitespace run length at which a search term is rejected.
const MAX_WHITESPACE_RUN: usize = 3;

/// Reasons a search keystroke is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchInputError {
    #[error("Search term too long (max 50 characters)")]
    TooLong,
    #[error("Invalid characters in search term")]
    InvalidCharacters,
    #[error("Too many consecutive spaces")]
    ConsecutiveSpaces,
}

/// Validate raw search input, returning the normalized term.
///
/// Rules apply in order and the first failure wins. The trimmed value is
/// what every rule inspects, so leading and trailing whitespace never
/// counts against the term.
pub fn validate_search_input(input: &str) -> Result<String, SearchInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if trimmed.chars().count() > MAX_SEARCH_LEN {
        return Err(SearchInputError::TooLong);
    }
    if trimmed.contains(FORBIDDEN_CHARS) {
        return Err(SearchInputError::InvalidCharacters);
    }
    if longest_whitespace_run(trimmed) >= MAX_WHITESPACE_RUN {
        return Err(SearchInputError::ConsecutiveSpaces);
    }
    Ok(trimmed.to_string())
}

fn longest_whitespace_run(s: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in s.chars() {
        if c.is_whitespace() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Case-insensitive substring match on the entry name. An empty filter matches everything.
pub fn matches_filter(node: &TreeNode, filter: &str) -> bool {
    filter.is_empty() || node.name().to_lowercase().contains(&filter.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::FileSubtype;

    #[test]
    fn empty_and_blank_input_is_valid() {
        assert_eq!(validate_search_input(""), Ok(String::new()));
        assert_eq!(validate_search_input("   \t "), Ok(String::new()));
    }

    #[test]
    fn valid_input_is_trimmed() {
        assert_eq!(validate_search_input("  report "), Ok("report".into()));
    }

    #[test]
    fn too_long_rejected() {
        let input = "a".repeat(51);
        let err = validate_search_input(&input).unwrap_err();
        assert_eq!(err, SearchInputError::TooLong);
        assert_eq!(err.to_string(), "Search term too long (max 50 characters)");
    }

    #[test]
    fn exactly_fifty_accepted() {
        let input = "a".repeat(50);
        assert_eq!(validate_search_input(&input), Ok(input.clone()));
    }

    #[test]
    fn each_forbidden_char_rejected() {
        for c in FORBIDDEN_CHARS {
            let input = format!("ab{}cd", c);
            let err = validate_search_input(&input).unwrap_err();
            assert_eq!(err.to_string(), "Invalid characters in search term");
        }
    }

    #[test]
    fn consecutive_spaces_rejected() {
        let err = validate_search_input("test   file").unwrap_err();
        assert_eq!(err.to_string(), "Too many consecutive spaces");
        assert!(validate_search_input("test  file").is_ok());
    }

    #[test]
    fn mixed_whitespace_run_counts() {
        assert_eq!(
            validate_search_input("a \t b"),
            Err(SearchInputError::ConsecutiveSpaces)
        );
    }

    #[test]
    fn length_checked_before_characters() {
        let input = format!("{}<", "a".repeat(55));
        assert_eq!(
            validate_search_input(&input),
            Err(SearchInputError::TooLong)
        );
    }

    #[test]
    fn characters_checked_before_spaces() {
        assert_eq!(
            validate_search_input("a   <b"),
            Err(SearchInputError::InvalidCharacters)
        );
    }

    #[test]
    fn filter_match_is_case_insensitive() {
        let node = TreeNode::file(FileSubtype::Pdf, "Employee Handbook", "2017-01-06");
        assert!(matches_filter(&node, "employee"));
        assert!(matches_filter(&node, "HAND"));
        assert!(matches_filter(&node, ""));
        assert!(!matches_filter(&node, "expenses"));
    }
}
