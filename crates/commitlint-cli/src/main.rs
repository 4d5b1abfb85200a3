//! atl-commitlint: commit message policy checker
//!
//! ## Commands
//!
//! - `check`: lint one message from a file, `COMMIT_EDITMSG` or stdin
//! - `range`: lint every commit in a git revision range
//! - `print-config`: show the resolved rule table
//! - `types`: list the allowed commit types
//!
//! Exit status is 0 when every message passes, 1 when any message fails and
//! 2 when the configuration or input cannot be used.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};

use commitlint_core::obs::LintSpan;
use commitlint_core::{
    commit_types, discover_config, evaluate, init_tracing, read_commits, strip_comments,
    CommitMessage, CommitRange, LintReport, LintResult, RawConfig, RuleSet, CONFIG_ENV_VAR,
};

/// Where git leaves the message being edited.
const DEFAULT_EDIT_PATH: &str = ".git/COMMIT_EDITMSG";

#[derive(Parser)]
#[command(name = "atl-commitlint")]
#[command(author = "atl.chat contributors")]
#[command(version = commitlint_core::VERSION)]
#[command(about = "Check commit messages against the atl.chat commit policy", long_about = None)]
struct Cli {
    /// Rule configuration file (JSON)
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a single commit message
    Check {
        /// File containing the message (default: stdin)
        #[arg(conflicts_with = "edit")]
        file: Option<PathBuf>,

        /// Read the message git is editing; comment lines are dropped
        #[arg(
            short,
            long,
            num_args = 0..=1,
            default_missing_value = DEFAULT_EDIT_PATH,
            value_name = "PATH"
        )]
        edit: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Lint every commit in a revision range
    Range {
        /// Exclusive start of the range
        #[arg(long, required_unless_present = "last", conflicts_with = "last")]
        from: Option<String>,

        /// Inclusive end of the range
        #[arg(long, default_value = "HEAD")]
        to: String,

        /// Lint only the HEAD commit
        #[arg(long)]
        last: bool,

        /// Repository to read from
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Print the resolved rule configuration as JSON
    PrintConfig,

    /// List the allowed commit types
    Types,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    fn from_report(report: &LintReport) -> Self {
        if report.passed {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    fn exit_code(self) -> ExitCode {
        match self {
            Self::Passed => ExitCode::SUCCESS,
            Self::Failed => ExitCode::from(1),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    init_tracing(cli.json, level);

    let cwd = match std::env::current_dir().context("Failed to resolve working directory") {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(2);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match run(&cli, &cwd, &mut stdout).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: &Cli, cwd: &Path, out: &mut dyn Write) -> Result<Outcome> {
    match &cli.command {
        Commands::Types => cmd_types(out),
        Commands::PrintConfig => {
            let set = load_rule_set(cli, cwd)?;
            cmd_print_config(&set, out)
        }
        Commands::Check {
            file,
            edit,
            format,
            strict,
        } => {
            let set = load_rule_set(cli, cwd)?;
            let raw = read_message(cwd, file.as_deref(), edit.as_deref())?;
            cmd_check(&set, &raw, *format, *strict, cli.verbose, out)
        }
        Commands::Range {
            from,
            to,
            last,
            repo,
            format,
            strict,
        } => {
            let set = load_rule_set(cli, cwd)?;
            let range = match (from, last) {
                (_, true) => CommitRange::Last,
                (Some(from), false) => CommitRange::Between {
                    from: from.clone(),
                    to: to.clone(),
                },
                (None, false) => bail!("either --from or --last is required"),
            };
            cmd_range(&set, &cwd.join(repo), &range, *format, *strict, cli.verbose, out).await
        }
    }
}

/// Resolve and validate the rule set before any message is read.
fn load_rule_set(cli: &Cli, cwd: &Path) -> Result<RuleSet> {
    let explicit = cli.config.as_ref().map(|p| cwd.join(p));
    let (set, source) =
        discover_config(cwd, explicit.as_deref()).context("Failed to load rule configuration")?;
    info!(source = %source, "rule configuration resolved");
    Ok(set)
}

fn read_message(cwd: &Path, file: Option<&Path>, edit: Option<&Path>) -> Result<String> {
    let raw = match (edit, file) {
        (Some(path), _) => {
            let path = cwd.join(path);
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            strip_comments(&text)
        }
        (None, Some(path)) => {
            let path = cwd.join(path);
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        (None, None) => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read commit message from stdin")?;
            text
        }
    };

    if raw.trim().is_empty() {
        bail!("no commit message to lint");
    }
    Ok(raw)
}

fn cmd_check(
    set: &RuleSet,
    raw: &str,
    format: OutputFormat,
    strict: bool,
    verbose: bool,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let msg = CommitMessage::parse(raw);
    let verdict = {
        let _span = LintSpan::enter("input");
        evaluate(&msg, set)
    };
    let result = LintResult {
        sha: None,
        input: msg.header().to_string(),
        verdict,
    };
    let report = LintReport::new(vec![result], strict);
    write_report(&report, set, format, verbose, out)?;
    Ok(Outcome::from_report(&report))
}

async fn cmd_range(
    set: &RuleSet,
    repo: &Path,
    range: &CommitRange,
    format: OutputFormat,
    strict: bool,
    verbose: bool,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let commits = read_commits(repo, range)
        .await
        .with_context(|| format!("Failed to read commits {range}"))?;

    let results = commits
        .into_iter()
        .map(|commit| {
            let _span = LintSpan::enter(&commit.sha);
            let msg = CommitMessage::parse(&commit.message);
            LintResult {
                input: msg.header().to_string(),
                verdict: evaluate(&msg, set),
                sha: Some(commit.sha),
            }
        })
        .collect();

    let report = LintReport::new(results, strict);
    write_report(&report, set, format, verbose, out)?;
    Ok(Outcome::from_report(&report))
}

fn cmd_print_config(set: &RuleSet, out: &mut dyn Write) -> Result<Outcome> {
    let config = RawConfig::from_rule_set(set);
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;
    writeln!(out, "{json}")?;
    Ok(Outcome::Passed)
}

fn cmd_types(out: &mut dyn Write) -> Result<Outcome> {
    let width = commit_types().iter().map(|t| t.name.len()).max().unwrap_or(0);
    for t in commit_types() {
        writeln!(out, "{:<width$}  {}: {}", t.name, t.title, t.description)?;
    }
    Ok(Outcome::Passed)
}

fn write_report(
    report: &LintReport,
    set: &RuleSet,
    format: OutputFormat,
    verbose: bool,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Text => {
            write!(out, "{}", report.render_text(set.help_url(), verbose))?;
        }
    }
    Ok(())
}
