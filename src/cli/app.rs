//! Main app runner: config merging and subcommand dispatch

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chrono::Local;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::ports::{ConfigStore, RemoteError};
use crate::application::{
    DeployError, DeployUseCase, PostError, PrepareEpisodeInput, PrepareEpisodeUseCase,
    SyncError, SyncRepositoryUseCase, TagEpisodeUseCase, TagError,
};
use crate::domain::config::AppConfig;
use crate::domain::error::{ConfigError, EpisodeError};
use crate::domain::sync::SyncOutcome;
use crate::infrastructure::{
    CommandEditor, GitCli, Id3TagStore, PageEpisodeResolver, SshIdentity, SshRemote,
    XdgConfigStore,
};

use super::args::{Cli, Commands};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Errors surfaced by a subcommand
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Episode(#[from] EpisodeError),

    #[error(transparent)]
    Tag(#[from] TagError),

    #[error(transparent)]
    Post(#[from] PostError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Run the parsed command line and map the outcome to an exit code
pub async fn run(cli: Cli) -> ExitCode {
    info!(version = env!("CARGO_PKG_VERSION"), "podcast-publisher");

    let Some(command) = cli.command else {
        warn!("nothing to do");
        return ExitCode::from(EXIT_SUCCESS);
    };

    let store = match &cli.config {
        Some(path) => XdgConfigStore::with_path(path),
        None => XdgConfigStore::new(),
    };

    let name = command.name();
    let started = Instant::now();
    match dispatch(command, &store).await {
        Ok(()) => {
            info!("completed {} in {:.1?}", name, started.elapsed());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            error!(command = name, "{}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn dispatch(command: Commands, store: &impl ConfigStore) -> Result<(), AppError> {
    let config = load_merged_config(store, command.overlay()).await?;

    match command {
        Commands::Mp3(args) => run_mp3(&config, args.file).await,
        Commands::Deploy(args) => run_deploy(&config, args.file).await,
        Commands::Prep(_) => run_prep(&config).await,
        Commands::Git(_) => run_git(&config).await,
    }
}

/// Load and merge configuration: defaults < file < env and flags
pub async fn load_merged_config(
    store: &impl ConfigStore,
    overlay: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load().await?;
    debug!(path = %store.path().display(), exists = store.exists(), "config file");

    Ok(AppConfig::defaults().merge(file_config).merge(overlay))
}

async fn run_mp3(config: &AppConfig, file: PathBuf) -> Result<(), AppError> {
    let request = config.tag_request(file)?;

    let use_case = TagEpisodeUseCase::new(Id3TagStore::new());
    let output = use_case.execute(&request).await?;

    Presenter::new().success(&format!(
        "{} tagged as \"{}\" ({})",
        output.file.display(),
        output.tags.title,
        output.tags.year
    ));
    Ok(())
}

async fn run_deploy(config: &AppConfig, file: PathBuf) -> Result<(), AppError> {
    let request = config.deploy_request(file)?;
    debug!(policy = %request.host_key_policy, key = %request.private_key.display(), "ssh identity");

    let identity = SshIdentity::load(request.user.clone(), &request.private_key).await?;
    let remote = SshRemote::new(identity, request.host_key_policy)
        .with_progress(std::io::stderr().is_terminal());

    DeployUseCase::new(remote).execute(&request).await?;

    Presenter::new().success(&format!(
        "{} deployed to {} and {}",
        request.file.display(),
        request.host,
        request.archive_host
    ));
    Ok(())
}

async fn run_prep(config: &AppConfig) -> Result<(), AppError> {
    let settings = config.prep_settings()?;

    let source = PageEpisodeResolver::new(settings.page_url, settings.episode_pattern)?;
    let editor = settings.editor.map(CommandEditor::new);
    let use_case = PrepareEpisodeUseCase::new(source, editor);

    let output = use_case
        .execute(PrepareEpisodeInput {
            posts_location: settings.posts_location,
            date: Local::now().naive_local(),
        })
        .await?;

    let presenter = Presenter::new();
    presenter.success(&format!(
        "episode {} post created: {}",
        output.number,
        output.path.display()
    ));
    if !output.editor_opened {
        presenter.info("editor not started");
    }
    Ok(())
}

async fn run_git(config: &AppConfig) -> Result<(), AppError> {
    let repo = config.repo_location()?;
    info!(repo = %repo.display(), "sync repository");

    let use_case = SyncRepositoryUseCase::new(GitCli::new(repo));
    let outcome = use_case.execute(Local::now().naive_local()).await?;

    let presenter = Presenter::new();
    match outcome {
        SyncOutcome::Clean => presenter.info("no changes to commit"),
        SyncOutcome::Committed { message, changes } => {
            for change in &changes {
                presenter.change(change);
            }
            presenter.success(&format!("committed and pushed: {}", message));
        }
    }
    Ok(())
}
