//! Tokenizer for `-name`, `-name=value`, `--name` and `--name=value` arguments.

use serde::Serialize;

/// Prefix that turns a flag into the negation of another flag (`-nofoo`).
const NEGATION_PREFIX: &str = "no";

/// One normalized flag occurrence.
///
/// `name` always carries exactly one leading dash, so `--bau` and `-bau`
/// produce the same token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub name: String,
    /// Raw text after the first `=`, or `None` when no `=` was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Flag negated by a `-noX` form (`-nobau` negates `-bau`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negates: Option<String>,
}

impl Token {
    /// Value as the store records it: a bare flag counts as the empty string.
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Key of the flag this token negates, if it is a `-noX` form.
    pub fn negated_base(&self) -> Option<&str> {
        self.negates.as_deref()
    }

    pub fn is_negation(&self) -> bool {
        self.negates.is_some()
    }
}

/// Split the argument vector into flag tokens, in input order.
///
/// The caller strips the program name first. Elements are never split on
/// whitespace. Arguments without a leading dash are skipped, as are dash-only
/// arguments with no name (`-`, `--`, `-=x`). Duplicates are kept; the store
/// resolves them.
pub fn tokenize<I, S>(args: I) -> Vec<Token>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = Vec::new();
    for arg in args {
        let arg = arg.as_ref();
        match parse_token(arg) {
            Some(token) => tokens.push(token),
            None => tracing::trace!(arg, "skipping non-flag argument"),
        }
    }
    tokens
}

/// Parse a single argument, returning `None` if it is not a flag.
pub fn parse_token(arg: &str) -> Option<Token> {
    let body = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))?;

    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value.to_string())),
        None => (body, None),
    };
    if name.is_empty() {
        return None;
    }

    // A bare `-no` negates nothing.
    let negates = name
        .strip_prefix(NEGATION_PREFIX)
        .filter(|base| !base.is_empty())
        .map(|base| format!("-{base}"));

    Some(Token {
        name: format!("-{name}"),
        value,
        negates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(name: &str, value: Option<&str>) -> Token {
        Token {
            name: name.to_string(),
            value: value.map(str::to_string),
            negates: None,
        }
    }

    #[test]
    fn single_and_double_dash_normalize_to_one_name() {
        assert_eq!(parse_token("-bau"), Some(tok("-bau", None)));
        assert_eq!(parse_token("--bau"), Some(tok("-bau", None)));
        assert_eq!(parse_token("--bau=1"), parse_token("-bau=1"));
    }

    #[test]
    fn value_is_everything_after_first_equals() {
        assert_eq!(parse_token("-k=a=b c"), Some(tok("-k", Some("a=b c"))));
        assert_eq!(parse_token("-k="), Some(tok("-k", Some(""))));
    }

    #[test]
    fn non_flags_and_empty_names_are_skipped() {
        let tokens = tokenize(["file.txt", "-", "--", "-=x", "-a", "b"]);
        assert_eq!(tokens, vec![tok("-a", None)]);
    }

    #[test]
    fn triple_dash_keeps_one_extra_dash() {
        assert_eq!(parse_token("---x"), Some(tok("--x", None)));
    }

    #[test]
    fn duplicates_are_preserved_in_order() {
        let tokens = tokenize(["-x=11", "--x=12", "-x"]);
        let values: Vec<_> = tokens.iter().map(|t| t.value.as_deref()).collect();
        assert_eq!(values, vec![Some("11"), Some("12"), None]);
        assert!(tokens.iter().all(|t| t.name == "-x"));
    }

    #[test]
    fn negation_base() {
        let neg = |arg| parse_token(arg).unwrap();
        assert_eq!(neg("-nobau").negated_base(), Some("-bau"));
        assert_eq!(neg("-nobau=0").negated_base(), Some("-bau"));
        assert_eq!(neg("--nobau=1").negated_base(), Some("-bau"));
        assert_eq!(neg("--nobau=1").name, "-nobau");
        assert_eq!(neg("-no").negated_base(), None);
        assert!(!neg("-bau").is_negation());
        assert!(!neg("-on").is_negation());
    }
}
