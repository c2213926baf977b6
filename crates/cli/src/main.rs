mod query;

use anyhow::{Context, Result};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use getarg::{ArgStore, Token, tokenize};
use tracing_subscriber::{EnvFilter, fmt};

use crate::query::{Query, QueryReport, run_queries};

#[derive(Parser)]
#[command(name = "getarg")]
#[command(version, about = "Inspect how dash-style flags are tokenized and resolved", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the normalized tokens for an argument list
    Tokens(TokensArgs),

    /// Resolve an argument list and look up flags with typed accessors
    Query(QueryArgs),
}

#[derive(Parser)]
struct TokensArgs {
    /// Print tokens as a JSON array
    #[arg(long)]
    json: bool,

    /// Arguments to tokenize (after `--`)
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

#[derive(Parser)]
struct QueryArgs {
    /// Boolean lookup, default false
    #[arg(long = "bool", value_name = "NAME[=DEFAULT]", allow_hyphen_values = true)]
    bools: Vec<String>,

    /// String lookup, default empty
    #[arg(long = "string", value_name = "NAME[=DEFAULT]", allow_hyphen_values = true)]
    strings: Vec<String>,

    /// Integer lookup, default 0
    #[arg(long = "int", value_name = "NAME[=DEFAULT]", allow_hyphen_values = true)]
    ints: Vec<String>,

    /// Every value given for a repeatable flag
    #[arg(long = "all", value_name = "NAME", allow_hyphen_values = true)]
    alls: Vec<String>,

    /// Only output JSON
    #[arg(long)]
    json: bool,

    /// Arguments to resolve (after `--`)
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    match cli.command {
        Commands::Tokens(args) => tokens_command(args),
        Commands::Query(args) => {
            let sub = matches
                .subcommand_matches("query")
                .context("query subcommand matches are missing")?;
            query_command(args, sub)
        }
    }
}

fn tokens_command(args: TokensArgs) -> Result<()> {
    tracing::debug!("executing tokens command");

    let tokens = tokenize(&args.args);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    for token in &tokens {
        println!("{}", describe_token(token));
    }
    if tokens.len() < args.args.len() {
        eprintln!(
            "Note: {} argument(s) are not flags and were skipped",
            args.args.len() - tokens.len()
        );
    }
    Ok(())
}

fn describe_token(token: &Token) -> String {
    let mut line = match &token.value {
        Some(value) => format!("{}={}", token.name, value),
        None => token.name.clone(),
    };
    if let Some(base) = token.negated_base() {
        line.push_str(&format!(" (negates {base})"));
    }
    line
}

fn query_command(args: QueryArgs, matches: &ArgMatches) -> Result<()> {
    tracing::debug!("executing query command");

    let queries = collect_queries(&args, matches)?;
    let store = ArgStore::parse(&args.args);
    let report: QueryReport = run_queries(&store, &queries);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for result in &report.results {
            println!("{} = {}", result.name, result.value);
        }
    }
    Ok(())
}

type SpecParser = fn(&str) -> Result<Query>;

/// Build queries in the order they were given, across all lookup kinds.
fn collect_queries(args: &QueryArgs, matches: &ArgMatches) -> Result<Vec<Query>> {
    let groups: [(&str, &[String], SpecParser); 4] = [
        ("bools", &args.bools, Query::bool_spec),
        ("strings", &args.strings, Query::string_spec),
        ("ints", &args.ints, Query::int_spec),
        ("alls", &args.alls, Query::all_spec),
    ];

    let mut ordered = Vec::new();
    for (id, specs, parse) in groups {
        let indices = matches.indices_of(id).into_iter().flatten();
        for (spec, index) in specs.iter().zip(indices) {
            ordered.push((index, parse(spec)?));
        }
    }
    ordered.sort_by_key(|(index, _)| *index);

    Ok(ordered.into_iter().map(|(_, query)| query).collect())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
