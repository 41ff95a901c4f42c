use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use lib::config::IndexConfig;
use lib::index::{CheckStatus, Generation};

#[derive(Parser)]
#[command(name = "reindex-docs")]
#[command(about = "Rebuild the documentation index from rust-docs/", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    paths: PathArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Scan skills and docs and overwrite the index document (the default when no subcommand is given).
    Generate,

    /// Render the index in memory and exit non-zero if the document on disk differs. Never writes.
    Check,
}

#[derive(Args, Clone, Debug, Default)]
struct PathArgs {
    /// Config file path (default: REINDEX_CONFIG_PATH or ./reindex.json)
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Documentation root (overrides config docsDir)
    #[arg(long, global = true, value_name = "PATH")]
    docs_dir: Option<PathBuf>,

    /// Output document (overrides config output)
    #[arg(long, short, global = true, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let code = match cli.command {
        Some(Commands::Version) => {
            println!("reindex-docs {}", env!("CARGO_PKG_VERSION"));
            0
        }
        Some(Commands::Check) => exit_code("check", run_check(cli.paths)),
        Some(Commands::Generate) | None => exit_code("generate", run_generate(cli.paths)),
    };
    std::process::exit(code);
}

fn exit_code(what: &str, result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("{} failed: {:#}", what, e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn resolve_config(paths: PathArgs) -> anyhow::Result<IndexConfig> {
    let (mut config, path) = lib::config::load_config(paths.config)?;
    log::debug!("using config {}", path.display());
    if let Some(d) = paths.docs_dir {
        config.docs_dir = d;
    }
    if let Some(o) = paths.output {
        config.output = o;
    }
    Ok(config)
}

fn run_generate(paths: PathArgs) -> anyhow::Result<i32> {
    let config = resolve_config(paths)?;
    println!("Scanning {} ...", config.docs_dir.display());
    let generation = lib::index::generate(&config)?;
    println!(
        "Found {} skills and {} documentation indexes",
        generation.skills.len(),
        generation.docs.len()
    );
    println!("Index rebuilt: {}", config.output.display());
    print_summary(&generation);
    Ok(0)
}

fn run_check(paths: PathArgs) -> anyhow::Result<i32> {
    let config = resolve_config(paths)?;
    let (generation, status) = lib::index::check(&config)?;
    print_warnings(&generation);
    match status {
        CheckStatus::UpToDate => {
            println!("{} is up to date", config.output.display());
            Ok(0)
        }
        CheckStatus::Stale => {
            println!("{} is out of date; run reindex-docs", config.output.display());
            Ok(1)
        }
        CheckStatus::Missing => {
            println!("{} does not exist; run reindex-docs", config.output.display());
            Ok(1)
        }
    }
}

fn print_summary(generation: &Generation) {
    println!("Summary:");
    println!("   - Skills indexed: {}", generation.skills.len());
    println!("   - Docs indexed: {}", generation.docs.len());
    println!("   - Skill categories: {}", generation.categories.len());
    for (name, count) in &generation.categories {
        println!("     • {}: {}", name, count);
    }
    print_warnings(generation);
}

fn print_warnings(generation: &Generation) {
    if !generation.warnings.is_empty() {
        println!("   - Warnings: {}", generation.warnings.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn path_flags_before_subcommand_are_kept() {
        let cli = parse(&["reindex-docs", "--docs-dir", "docs", "--output", "OUT.md", "generate"]);
        assert!(matches!(cli.command, Some(Commands::Generate)));
        assert_eq!(cli.paths.docs_dir, Some(PathBuf::from("docs")));
        assert_eq!(cli.paths.output, Some(PathBuf::from("OUT.md")));
    }

    #[test]
    fn path_flags_after_subcommand_are_kept() {
        let cli = parse(&["reindex-docs", "check", "-c", "cfg.json", "-o", "OUT.md"]);
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert_eq!(cli.paths.config, Some(PathBuf::from("cfg.json")));
        assert_eq!(cli.paths.output, Some(PathBuf::from("OUT.md")));
    }

    #[test]
    fn no_subcommand_takes_path_flags() {
        let cli = parse(&["reindex-docs", "--docs-dir", "/missing"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.paths.docs_dir, Some(PathBuf::from("/missing")));
    }

    #[test]
    fn cli_overrides_replace_config_values() {
        let paths = PathArgs {
            config: Some(std::env::temp_dir().join("reindex-cli-no-such-config.json")),
            docs_dir: Some(PathBuf::from("/missing")),
            output: Some(PathBuf::from("OUT.md")),
        };
        let config = resolve_config(paths).unwrap();
        assert_eq!(config.docs_dir, PathBuf::from("/missing"));
        assert_eq!(config.output, PathBuf::from("OUT.md"));
    }
}
