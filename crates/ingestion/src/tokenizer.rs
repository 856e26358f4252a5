//! Line qualification and tokenization

use contracts::EmptyFieldPolicy;

/// A line carries data only if the separator occurs after its first character.
///
/// Blank lines, separator-less lines and lines starting with the separator are
/// discarded before header counting.
pub fn qualifies(line: &str, separator: &str) -> bool {
    !separator.is_empty() && line.find(separator).is_some_and(|idx| idx > 0)
}

/// Split a line into raw (untrimmed) tokens.
///
/// Every character of `separator` acts as a delimiter. Under
/// [`EmptyFieldPolicy::Collapse`] runs of delimiters produce no empty tokens, so
/// an empty field shifts all later fields one position left.
pub fn tokenize<'a>(line: &'a str, separator: &str, policy: EmptyFieldPolicy) -> Vec<&'a str> {
    let split = line.split(|c: char| separator.contains(c));
    match policy {
        EmptyFieldPolicy::Collapse => split.filter(|t| !t.is_empty()).collect(),
        EmptyFieldPolicy::Preserve => split.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifies() {
        assert!(qualifies("7|HOSP", "|"));
        assert!(qualifies("a|", "|"));
        assert!(!qualifies("|7|HOSP", "|"));
        assert!(!qualifies("", "|"));
        assert!(!qualifies("no separator here", "|"));
        assert!(!qualifies("anything", ""));
    }

    #[test]
    fn test_qualifies_multi_char_separator() {
        assert!(qualifies("a::b", "::"));
        assert!(!qualifies("a:b", "::"));
    }

    #[test]
    fn test_collapse_drops_empty_tokens() {
        let tokens = tokenize("a||b|c|", "|", EmptyFieldPolicy::Collapse);
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_preserve_keeps_empty_tokens() {
        let tokens = tokenize("a||b|c|", "|", EmptyFieldPolicy::Preserve);
        assert_eq!(tokens, vec!["a", "", "b", "c", ""]);
    }

    #[test]
    fn test_tokens_are_not_trimmed() {
        let tokens = tokenize(" a | b ", "|", EmptyFieldPolicy::Collapse);
        assert_eq!(tokens, vec![" a ", " b "]);
    }

    #[test]
    fn test_each_separator_char_is_a_delimiter() {
        let tokens = tokenize("a;b,c", ";,", EmptyFieldPolicy::Collapse);
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }
}
