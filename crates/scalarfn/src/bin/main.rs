//! scalarfn command-line interface

use clap::{Parser, Subcommand};
use scalarfn::cli::{eval, list, output};
use scalarfn::{FunctionConfig, MapKeyDedupPolicy};

/// Scalar function tool
#[derive(Parser)]
#[command(name = "sfn")]
#[command(author, version, about = "Evaluate built-in SQL scalar functions", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a function over JSON literal arguments
    Eval {
        /// Function name
        function: String,

        /// Arguments as JSON literals
        arguments: Vec<String>,

        /// Output format (text, json, pretty)
        #[arg(short = 'f', long, default_value = "text")]
        format: output::OutputFormat,

        /// Print the resolved result type
        #[arg(short = 't', long = "type")]
        show_type: bool,

        /// Enable ANSI mode
        #[arg(long)]
        ansi: bool,

        /// Return null instead of -1 for size(null)
        #[arg(long)]
        no_legacy_size_of_null: bool,

        /// Duplicate map key handling (last_win, exception)
        #[arg(long, default_value = "last_win")]
        map_key_dedup_policy: MapKeyDedupPolicy,

        /// Upper bound on generated array lengths
        #[arg(long)]
        max_array_length: Option<usize>,
    },

    /// List the built-in functions
    List {
        /// Only show functions whose name contains this text
        filter: Option<String>,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);
    output::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Eval {
            function,
            arguments,
            format,
            show_type,
            ansi,
            no_legacy_size_of_null,
            map_key_dedup_policy,
            max_array_length,
        } => {
            let mut function_config = FunctionConfig::new()
                .with_ansi(ansi)
                .with_legacy_size_of_null(!no_legacy_size_of_null)
                .with_map_key_dedup_policy(map_key_dedup_policy);
            if let Some(limit) = max_array_length {
                function_config = function_config.with_max_array_length(limit);
            }
            let config = eval::EvalConfig {
                function,
                arguments,
                function_config,
                output_format: format,
                show_type,
            };
            eval::evaluate(&config)
        }

        Commands::List { filter } => list::list(filter.as_deref()),
    };

    match result {
        Ok(content) => println!("{}", content),
        Err(e) => {
            eprintln!("{}", output::format_error(&e));
            std::process::exit(1);
        }
    }
}
