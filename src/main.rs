use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use conventional_bump::cli::{orchestration, AnalysisArgs, BumpWorkflowArgs};
use conventional_bump::config::{self, Config};
use conventional_bump::domain::Level;
use conventional_bump::git::Git2Repository;
use conventional_bump::release::Git2Executor;
use conventional_bump::ui;

#[derive(Parser)]
#[command(
    name = "conventional-bump",
    version,
    about = "Bump semantic versions from conventional commits"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value = "warn",
        help = "Log filter used when RUST_LOG is unset"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the recommended bump level (major, minor or patch)
    #[command(visible_alias = "rb")]
    RecommendedBump(HistoryArgs),

    /// Bump the version according to the recommended level
    #[command(visible_alias = "b")]
    Bump {
        #[command(flatten)]
        history: HistoryArgs,

        #[arg(long, overrides_with = "no_tag", help = "Create a tag for the new version")]
        tag: bool,

        #[arg(long, overrides_with = "tag", help = "Do not create a tag for the new version")]
        no_tag: bool,

        #[arg(long, help = "Push the release commit and tag")]
        push: bool,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,

        #[arg(short, long, help = "Commit message template, %{version} is replaced")]
        message: Option<String>,

        #[arg(long, help = "Release this level (major, minor or patch) instead of the recommended one")]
        level: Option<Level>,
    },
}

#[derive(Args)]
struct HistoryArgs {
    #[arg(long, help = "Tag prefix in front of the semantic version")]
    prefix: Option<String>,

    #[arg(long, help = "Only consider commits touching this path")]
    path: Option<PathBuf>,
}

impl HistoryArgs {
    fn into_analysis(self, config: &Config) -> AnalysisArgs {
        AnalysisArgs {
            tag_prefix: self.prefix.unwrap_or_else(|| config.tag_prefix.clone()),
            path: self.path.or_else(|| config.path.clone()),
            verbose: true,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let config = config::load_config(cli.config.as_deref()).context("Error loading config")?;
    let history = Git2Repository::open(".").context("Not in a git repository")?;

    match cli.command {
        Commands::RecommendedBump(history_args) => {
            let analysis = history_args.into_analysis(&config);
            let recommendation = orchestration::recommend(&history, &analysis)?;

            for warning in &recommendation.warnings {
                ui::display_boundary_warning(warning);
            }
            println!("{}", recommendation.level());
        }
        Commands::Bump {
            history: history_args,
            tag,
            no_tag,
            push,
            dry_run,
            message,
            level,
        } => {
            let args = BumpWorkflowArgs {
                analysis: history_args.into_analysis(&config),
                create_tag: if tag || no_tag { tag } else { config.bump.tag },
                push: push || config.bump.push,
                dry_run,
                commit_message: message.unwrap_or_else(|| config.bump.message.clone()),
                level,
            };

            let executor = Git2Executor::open(".", &config.version_file, &config.remote)
                .context("Not in a git repository")?;

            if args.dry_run {
                ui::display_status("Dry run: no files, commits or tags will be written");
            }

            let result = orchestration::run_bump(&history, &executor, &args)?;

            for warning in &result.recommendation.warnings {
                ui::display_boundary_warning(warning);
            }
            ui::display_commit_analysis(
                &result.recommendation.commits,
                result
                    .recommendation
                    .latest_tag
                    .as_ref()
                    .map(|tag| tag.value.as_str()),
            );
            ui::display_outcome(&result.outcome, args.dry_run);
        }
    }

    Ok(())
}
