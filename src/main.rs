use cardq::cli::{self, CheckOptions, CheckResult, CliError, OutputFormat};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, BufRead};
use std::process::ExitCode;
use tracing::debug;

#[derive(ClapParser)]
#[command(name = "cardq")]
#[command(about = "cardq - Compile card search queries into structured query trees")]
#[command(version)]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query and print the query tree
    Check {
        /// The query to compile (reads one query per line from stdin if not provided)
        query: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't compile
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the parse tree of a query
    Tree {
        /// The query to parse
        query: String,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// List field aliases, operators and syntax
    Fields,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            query,
            format,
            pretty,
            syntax_only,
        } => run_check(query, format, pretty, syntax_only),
        Commands::Tree { query, json } => {
            let format = if json {
                OutputFormat::TreeJson
            } else {
                OutputFormat::Tree
            };
            run_check(Some(query), format, true, false)
        }
        Commands::Fields => {
            print!("{}", cli::get_fields_reference());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run_check(
    query: Option<String>,
    format: OutputFormat,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let queries = match query {
        Some(q) => vec![q],
        None if !atty::is(atty::Stream::Stdin) => {
            let mut lines = Vec::new();
            for line in io::stdin().lock().lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    lines.push(line);
                }
            }
            debug!(count = lines.len(), "read queries from stdin");
            lines
        }
        None => Vec::new(),
    };

    if queries.is_empty() {
        return Err(CliError::NoInput);
    }

    let total = queries.len();
    let mut failed = 0;
    for query in queries {
        let options = CheckOptions {
            query,
            format,
            pretty,
            syntax_only,
        };

        match cli::execute_check(&options) {
            Ok(CheckResult::SyntaxValid) => println!("Syntax is valid"),
            Ok(CheckResult::Success {
                output,
                diagnostics,
            }) => {
                for diagnostic in &diagnostics {
                    eprintln!("warning: {}", diagnostic);
                }
                println!("{}", output);
            }
            Err(e @ CliError::Parse(_)) => {
                eprintln!("{}", e);
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if failed > 0 {
        return Err(CliError::Failed { failed, total });
    }
    Ok(())
}
