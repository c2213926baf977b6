//! Resolved flag values and the typed lookups built on them.

use indexmap::IndexMap;

use crate::ArgError;
use crate::token::{Token, tokenize};

/// Value recorded for a base flag that was only given in `-noX` form.
const NEGATED_OFF: &str = "0";
const NEGATED_ON: &str = "1";

/// Everything seen for one flag name before precedence is applied.
#[derive(Debug, Default)]
struct Setting {
    /// Last value given directly as `-name[=value]`.
    direct: Option<String>,
    /// Outcome of the last `-noname[=value]`: `true` when it asked for the
    /// flag to be on (`-noname=0`).
    negated: Option<bool>,
}

impl Setting {
    /// A direct occurrence anywhere beats every negation.
    fn resolve(self) -> Option<String> {
        match (self.direct, self.negated) {
            (Some(value), _) => Some(value),
            (None, Some(true)) => Some(NEGATED_ON.to_string()),
            (None, Some(false)) => Some(NEGATED_OFF.to_string()),
            (None, None) => None,
        }
    }
}

/// Flag values parsed from an argument vector.
///
/// Built once, then read through [`get_bool`](Self::get_bool),
/// [`get_string`](Self::get_string) and [`get_int`](Self::get_int). Names are
/// queried with their leading dash (`"-bau"`), whichever of `-bau`/`--bau`
/// was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgStore {
    values: IndexMap<String, String>,
    multi: IndexMap<String, Vec<String>>,
}

impl ArgStore {
    /// Build a store from arguments that no longer include the program name.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_tokens(tokenize(args))
    }

    /// Build a store from a full argv whose first element is the program name.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Result<Self, ArgError> {
        let (_program, args) = argv.split_first().ok_or(ArgError::MissingProgramName)?;
        Ok(Self::parse(args))
    }

    /// Build a store from the current process arguments.
    ///
    /// Non-UTF-8 arguments are converted lossily.
    pub fn from_env() -> Self {
        let args: Vec<String> = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        Self::parse(args)
    }

    /// Replace the contents with a fresh parse of `args`.
    ///
    /// Nothing from the previous parse survives.
    pub fn reparse<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        *self = Self::parse(args);
    }

    /// Fold tokens into resolved values.
    ///
    /// Direct occurrences are last-write-wins per name. Negations are
    /// collected separately and only applied to names that never occurred
    /// directly, so `-x -nox` and `-nox -x` resolve the same way.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let token_count = tokens.len();
        let mut settings: IndexMap<String, Setting> = IndexMap::new();
        let mut multi: IndexMap<String, Vec<String>> = IndexMap::new();

        for token in tokens {
            if let Some(base) = token.negated_base() {
                let wants_on = token.value_or_empty() == "0";
                settings.entry(base.to_string()).or_default().negated = Some(wants_on);
            }
            let value = token.value.unwrap_or_default();
            multi
                .entry(token.name.clone())
                .or_default()
                .push(value.clone());
            settings.entry(token.name).or_default().direct = Some(value);
        }

        let mut values = IndexMap::with_capacity(settings.len());
        for (name, setting) in settings {
            if setting.direct.is_some() && setting.negated.is_some() {
                tracing::trace!(name = %name, "direct flag overrides negation");
            }
            if let Some(value) = setting.resolve() {
                values.insert(name, value);
            }
        }

        tracing::debug!(tokens = token_count, flags = values.len(), "parsed arguments");
        Self { values, multi }
    }

    /// Resolved value for `name`, or `None` if it was never given.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether `name` resolved to any value, including the empty string.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Every value given directly for `name`, in input order.
    ///
    /// Used for flags that may repeat (`-connect=a -connect=b`). Values
    /// derived from `-noname` are not included.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.multi.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `false` if the value is exactly `"0"`, `true` for any other value
    /// (a bare `-name` included), `default` if absent.
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        match self.get(name) {
            Some(value) => value != "0",
            None => default,
        }
    }

    /// Shorthand for `get_bool(name, false)`.
    pub fn flag(&self, name: &str) -> bool {
        self.get_bool(name, false)
    }

    /// The value as given, or `default` if absent. `-name` and `-name=`
    /// both yield `""`.
    pub fn get_string<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// The value as a decimal integer, or `default` if absent.
    ///
    /// A present value that does not start with a number yields `0`, not
    /// `default`. Callers rely on that.
    pub fn get_int(&self, name: &str, default: i64) -> i64 {
        match self.get(name) {
            Some(value) => atoi64(value),
            None => default,
        }
    }
}

/// Leading-integer conversion: optional whitespace and sign, then digits up to
/// the first non-digit. No digits gives `0`; overflow saturates.
pub fn atoi64(text: &str) -> i64 {
    let text = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut n: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(b - b'0');
        n = if negative {
            n.saturating_mul(10).saturating_sub(d)
        } else {
            n.saturating_mul(10).saturating_add(d)
        };
    }
    n
}
