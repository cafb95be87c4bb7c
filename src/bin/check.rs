//! pubsuffix-check: CLI tool for checking domain names against a suffix list.

use clap::{Parser, Subcommand};
use pubsuffix::{FindOptions, ListConfig, RuleKind, RuleSet};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pubsuffix-check")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Check domain names against a public suffix list", long_about = None)]
struct Cli {
    /// Public suffix list file (.dat, or .gz for gzipped)
    #[arg(short, long)]
    list: PathBuf,

    /// YAML list configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ignore rules from the private section when matching
    #[arg(long)]
    ignore_private: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split names into subdomain, registrable label and public suffix
    Parse {
        /// Names to parse
        #[arg(required = true)]
        names: Vec<String>,

        /// Print results as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Report whether names are valid registrable domains
    Valid {
        /// Names to check
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print the registrable domain of each name
    Domain {
        /// Names to look up
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print list statistics
    Stats,
}

/// One line of `parse --json` output.
#[derive(Serialize)]
struct ParseOutput<'a> {
    name: &'a str,
    #[serde(flatten)]
    domain: Option<pubsuffix::Domain>,
    error: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let list = match load_list(&cli) {
        Ok(list) => list,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let options = FindOptions::new().ignore_private(cli.ignore_private);

    match cli.command {
        Commands::Parse { names, json } => {
            for name in &names {
                parse_name(&list, name, &options, json);
            }
        }
        Commands::Valid { names } => {
            for name in &names {
                let valid = pubsuffix::is_valid_with(name, &list, &options);
                println!("{}\t{}", name, valid);
            }
        }
        Commands::Domain { names } => {
            for name in &names {
                match pubsuffix::registrable_domain_with(name, &list, &options) {
                    Ok(domain) => println!("{}\t{}", name, domain),
                    Err(e) => println!("{}\t-\t{}", name, e),
                }
            }
        }
        Commands::Stats => print_stats(&list),
    }
}

fn load_list(cli: &Cli) -> pubsuffix::Result<RuleSet> {
    let config = match &cli.config {
        Some(path) => ListConfig::from_yaml_path(path)?,
        None => ListConfig::default(),
    };
    log::info!("Loading rule list from {:?}", cli.list);
    RuleSet::from_path(&cli.list, &config)
}

fn parse_name(list: &RuleSet, name: &str, options: &FindOptions, json: bool) {
    let result = pubsuffix::parse_with(name, list, options);

    if json {
        let output = match &result {
            Ok(domain) => ParseOutput {
                name,
                domain: Some(domain.clone()),
                error: None,
            },
            Err(e) => ParseOutput {
                name,
                domain: None,
                error: Some(e.to_string()),
            },
        };
        match serde_json::to_string(&output) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Error: {}", e),
        }
        return;
    }

    match result {
        Ok(domain) => println!(
            "{}\ttrd={}\tsld={}\ttld={}",
            name,
            domain.trd().unwrap_or("-"),
            domain.sld().unwrap_or("-"),
            domain.tld()
        ),
        Err(e) => println!("{}\terror: {}", name, e),
    }
}

fn print_stats(list: &RuleSet) {
    let count = |kind: RuleKind| list.iter().filter(|r| r.kind() == kind).count();
    let private = list.iter().filter(|r| r.is_private()).count();

    println!("Rules:       {}", list.len());
    println!("  exact:     {}", count(RuleKind::Exact));
    println!("  wildcard:  {}", count(RuleKind::Wildcard));
    println!("  exception: {}", count(RuleKind::Exception));
    println!("  private:   {}", private);
    println!("  icann:     {}", list.len() - private);
}
