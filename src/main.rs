use anyhow::{Context, Result};
use clap::Parser;
use gh_module_sync::{
    cli::Cli,
    error::UserFriendly,
    github::{self, GitHubClient, RepoId},
    sync, Config, SyncReport,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose)
        .and_then(|()| sync_command(&cli))
        .user_friendly()
    {
        e.display();
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) -> Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(())
}

fn sync_command(cli: &Cli) -> Result<()> {
    // Credentials are checked before anything touches the network
    let token = github::get_token()?;

    info!("Loading configuration");
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&mut config, cli);

    let repo: RepoId = config.github.repo.parse()?;
    let client =
        GitHubClient::new(&config.github, &token).context("Failed to create GitHub client")?;

    println!("📊 Synchronizing module issues in {}...", repo);
    if config.sync.dry_run {
        println!("ℹ️  Dry run: no issue will be modified");
    }

    let report = sync::run(&client, &config);
    print_report(&report, config.sync.dry_run);

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(repo) = &cli.repo {
        config.github.repo = repo.clone();
    }
    if let Some(marker) = &cli.marker {
        config.sync.module_marker = marker.clone();
    }
    if cli.dry_run {
        config.sync.dry_run = true;
    }
}

fn print_report(report: &SyncReport, dry_run: bool) {
    println!("✓ Fetched {} issues", report.fetched);
    println!("✓ Found {} module issues", report.modules);

    if dry_run {
        println!("📝 {} issues would be updated", report.planned);
    } else {
        println!("📝 Updated {} issues", report.updated);
    }
    println!("   {} already up to date", report.unchanged);
    if report.without_sub_issues > 0 {
        println!("   {} without sub-issues", report.without_sub_issues);
    }
    if report.failed > 0 {
        println!("⚠️  {} updates failed (see logs)", report.failed);
    }
}
