use anyhow::{Context, Result};
use atribuir::attribution_set::{AttributionSet, UnknownPolicy};
use atribuir::blame::GitBlame;
use atribuir::cli::{Cli, OutputFormat};
use atribuir::csv_output::CsvReport;
use atribuir::definitions;
use atribuir::json_output::JsonReport;
use atribuir::paths::PathResolver;
use atribuir::scoring::{CategoryScorer, ContributionScorer, FileScorer};
use atribuir::walker::Walker;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Walk the tree and render the report in the requested format
fn render<S: FileScorer>(
    resolver: &PathResolver,
    scorer: &S,
    args: &Cli,
    policy: UnknownPolicy,
) -> Result<String> {
    let walker = Walker::new(resolver, scorer);

    match args.format {
        OutputFormat::Csv => {
            let mut report = CsvReport::new();
            let root_set = if args.root_only {
                walker.walk(&args.root)?
            } else {
                let mut visit = |set: &AttributionSet| {
                    report.set_header(set.header_row());
                    report.add_row(set.to_row(policy));
                };
                walker.walk_with(&args.root, Some(&mut visit))?
            };

            // Root-only runs and plain-file roots never reach the visitor
            if report.is_empty() {
                report.set_header(root_set.header_row());
                report.add_row(root_set.to_row(policy));
            }

            Ok(report.to_csv())
        }
        OutputFormat::Json => {
            let mut report = JsonReport::new();
            let root_set = if args.root_only {
                walker.walk(&args.root)?
            } else {
                let mut visit = |set: &AttributionSet| {
                    report.add_document(set.to_document(policy));
                };
                walker.walk_with(&args.root, Some(&mut visit))?
            };

            if report.is_empty() {
                report.add_document(root_set.to_document(policy));
            }

            report.to_json()
        }
    }
}

/// Build the scorer for the requested dimension and render the report
fn run(args: &Cli) -> Result<String> {
    let resolver = PathResolver::from_current_dir()
        .context("cannot determine the current working directory")?;

    match (&args.categories, &args.contributors) {
        (Some(file), None) => {
            let labels = definitions::load_categories(file)?;
            let scorer = CategoryScorer::new(&labels)
                .context("failed to compile category keyword patterns")?;
            render(&resolver, &scorer, args, UnknownPolicy::Include)
        }
        (None, Some(file)) => {
            let lookup = definitions::load_contributors(file)?;
            let blame = GitBlame::new(resolver.base());
            let scorer = ContributionScorer::new(lookup, blame)
                .context("failed to compile the blame line pattern")?;
            render(&resolver, &scorer, args, UnknownPolicy::Exclude)
        }
        (None, None) => {
            anyhow::bail!(
                "Must specify either --categories FILE or --contributors FILE. \
                 Usage: atribuir [PATH] --categories FILE"
            );
        }
        (Some(_), Some(_)) => {
            anyhow::bail!("Cannot specify both --categories and --contributors. Choose one.");
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let rendered = run(&args)?;

    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write report to '{}'", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}
