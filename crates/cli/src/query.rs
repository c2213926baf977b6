use anyhow::{Context, Result, bail};
use getarg::ArgStore;
use serde::Serialize;
use serde_json::Value;

/// A single lookup requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Bool { name: String, default: bool },
    String { name: String, default: String },
    Int { name: String, default: i64 },
    All { name: String },
}

impl Query {
    /// Parse `NAME[=DEFAULT]` for a boolean lookup (default `false`).
    pub fn bool_spec(spec: &str) -> Result<Self> {
        let (name, default) = split_spec(spec)?;
        let default = match default {
            None => false,
            Some("true" | "1") => true,
            Some("false" | "0") => false,
            Some(other) => {
                bail!("invalid bool default `{other}` in `{spec}` (expected true/false/1/0)")
            }
        };
        Ok(Self::Bool { name, default })
    }

    /// Parse `NAME[=DEFAULT]` for a string lookup (default empty).
    pub fn string_spec(spec: &str) -> Result<Self> {
        let (name, default) = split_spec(spec)?;
        Ok(Self::String {
            name,
            default: default.unwrap_or_default().to_string(),
        })
    }

    /// Parse `NAME[=DEFAULT]` for an integer lookup (default `0`).
    pub fn int_spec(spec: &str) -> Result<Self> {
        let (name, default) = split_spec(spec)?;
        let default = match default {
            None => 0,
            Some(text) => text
                .parse()
                .with_context(|| format!("invalid int default `{text}` in `{spec}`"))?,
        };
        Ok(Self::Int { name, default })
    }

    pub fn all_spec(spec: &str) -> Result<Self> {
        let (name, default) = split_spec(spec)?;
        if default.is_some() {
            bail!("`--all` takes a flag name without a default: `{spec}`");
        }
        Ok(Self::All { name })
    }

    fn name(&self) -> &str {
        match self {
            Self::Bool { name, .. }
            | Self::String { name, .. }
            | Self::Int { name, .. }
            | Self::All { name } => name,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Bool { .. } => "bool",
            Self::String { .. } => "string",
            Self::Int { .. } => "int",
            Self::All { .. } => "all",
        }
    }

    fn run(&self, store: &ArgStore) -> Value {
        match self {
            Self::Bool { name, default } => Value::from(store.get_bool(name, *default)),
            Self::String { name, default } => Value::from(store.get_string(name, default)),
            Self::Int { name, default } => Value::from(store.get_int(name, *default)),
            Self::All { name } => Value::from(store.get_all(name).to_vec()),
        }
    }
}

fn split_spec(spec: &str) -> Result<(String, Option<&str>)> {
    let (name, default) = match spec.split_once('=') {
        Some((name, default)) => (name, Some(default)),
        None => (spec, None),
    };
    if name.is_empty() {
        bail!("missing flag name in `{spec}`");
    }
    Ok((name.to_string(), default))
}

#[derive(Debug, Serialize)]
pub struct QueryResult {
    pub name: String,
    pub kind: &'static str,
    pub value: Value,
}

#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub results: Vec<QueryResult>,
}

pub fn run_queries(store: &ArgStore, queries: &[Query]) -> QueryReport {
    let results = queries
        .iter()
        .map(|query| QueryResult {
            name: query.name().to_string(),
            kind: query.kind(),
            value: query.run(store),
        })
        .collect();
    QueryReport { results }
}
