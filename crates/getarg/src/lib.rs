//! Dash-flag argument parsing with typed lookups.
//!
//! Arguments of the form `-name`, `-name=value`, `--name` and `--name=value`
//! are folded into an [`ArgStore`]. A few rules apply to every lookup:
//!
//! - `--name` is the same flag as `-name`.
//! - Repeating a flag keeps the last value.
//! - `-noname` turns `-name` off (`-noname=0` turns it on), unless `-name`
//!   itself appears anywhere in the arguments.
//!
//! ```
//! use getarg::ArgStore;
//!
//! let args = ArgStore::parse(["-listen", "--port=8333", "-nodebug"]);
//! assert!(args.get_bool("-listen", false));
//! assert!(!args.get_bool("-debug", true));
//! assert_eq!(args.get_int("-port", 0), 8333);
//! assert_eq!(args.get_string("-datadir", "~/.data"), "~/.data");
//! ```

pub mod store;
pub mod token;

pub use store::{ArgStore, atoi64};
pub use token::{Token, parse_token, tokenize};

/// Errors from building an [`ArgStore`].
#[derive(Debug, thiserror::Error)]
pub enum ArgError {
    /// `from_argv` was given an empty vector, so there was no program name to
    /// drop.
    #[error("argument vector is empty (expected the program name in slot 0)")]
    MissingProgramName,
}
