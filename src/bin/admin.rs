//! Back-office command line: uploads files with live progress and manages
//! movies and trailers through the HTTP API.
//!
//! Reads MOVIEFLIX_API_URL, MOVIEFLIX_USERNAME and MOVIEFLIX_PASSWORD.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use movieflix::client::api::ApiClient;
use movieflix::client::forms::{FormMode, MovieForm, TrailerForm, UploadSlot};
use movieflix::client::gateway::{EntityKind, RecordGateway};
use movieflix::client::upload::{
    spawn_upload_session, CandidateFile, HttpSubmitter, UploadOptions, UploadState,
};
use movieflix::common::upload::{format_bytes, UploadKind};
use movieflix::config::settings::ClientConfig;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "movieflix-admin", about = "Movieflix back-office client")]
struct Cli {
    /// API base URL, overriding MOVIEFLIX_API_URL
    #[arg(long)]
    api_url: Option<String>,
    /// Give up on an upload after this many seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MovieArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    /// Comma-separated list
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    director: Option<String>,
    /// Poster image to upload
    #[arg(long)]
    poster: Option<PathBuf>,
    /// Movie file to upload
    #[arg(long)]
    file: Option<PathBuf>,
    /// Trailer video to upload; a trailer is created alongside the movie
    #[arg(long)]
    trailer: Option<PathBuf>,
    /// Trailer link (YouTube, Vimeo or direct) instead of a trailer file
    #[arg(long, conflicts_with = "trailer")]
    trailer_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one file and print its resource URL
    Upload {
        /// movie, trailer or thumbnail
        kind: UploadKind,
        path: PathBuf,
    },
    /// Create a movie
    AddMovie(MovieArgs),
    /// Change fields of a movie
    EditMovie {
        id: i64,
        #[command(flatten)]
        fields: MovieArgs,
    },
    /// Add a trailer to a movie
    AddTrailer {
        movie_id: i64,
        #[arg(long)]
        title: Option<String>,
        /// Trailer video to upload
        #[arg(long, required_unless_present = "video_url")]
        video: Option<PathBuf>,
        /// Link to an already hosted video
        #[arg(long, conflicts_with = "video")]
        video_url: Option<String>,
        #[arg(long)]
        thumbnail: Option<PathBuf>,
    },
    /// Delete a movie and its trailers
    DeleteMovie {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Delete a trailer
    DeleteTrailer {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// List movies
    List {
        #[arg(long)]
        genre: Option<String>,
    },
    /// Show a movie with its trailers
    Show { id: i64 },
    /// Catalog statistics
    Dashboard,
}

impl Commands {
    /// Browsing is public; everything else needs an admin session.
    fn needs_session(&self) -> bool {
        !matches!(self, Commands::List { .. } | Commands::Show { .. })
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Runs one upload session to completion, printing progress as it goes.
async fn upload(
    api: &ApiClient,
    kind: UploadKind,
    path: &Path,
    timeout: Option<Duration>,
) -> anyhow::Result<String> {
    let mut options = UploadOptions::new(api.upload_endpoint(kind)?, kind.constraint());
    if let Some(timeout) = timeout {
        options = options.with_timeout(timeout);
    }
    let handle = spawn_upload_session(Arc::new(HttpSubmitter::from_api(api)), options, None);

    let file = CandidateFile::from_path(path).await?;
    let size = format_bytes(file.size());
    handle.select(file).await?;
    handle.submit().await?;

    let mut updates = handle.subscribe();
    loop {
        let snapshot = updates.borrow_and_update().clone();
        match snapshot.state {
            UploadState::Uploading | UploadState::Paused => {
                eprint!("\r{} {} ({}): {:>5.1}%", kind, path.display(), size, snapshot.progress);
            }
            UploadState::Completed => {
                eprintln!("\r{} {} ({}): 100.0%", kind, path.display(), size);
                return snapshot
                    .result_url
                    .context("Upload completed without a resource URL");
            }
            _ => {
                eprintln!();
                bail!(snapshot.error.unwrap_or_else(|| "Upload did not complete".to_string()));
            }
        }
        if updates.changed().await.is_err() {
            bail!("Upload session ended unexpectedly");
        }
    }
}

async fn fill_movie_form(
    api: &ApiClient,
    form: &mut MovieForm,
    args: MovieArgs,
    timeout: Option<Duration>,
) -> anyhow::Result<()> {
    let fields = &mut form.fields;
    fields.title = args.title.or(fields.title.take());
    fields.description = args.description.or(fields.description.take());
    fields.release_year = args.year.or(fields.release_year);
    fields.genre = args.genre.or(fields.genre.take());
    fields.director = args.director.or(fields.director.take());
    fields.trailer_url = args.trailer_url;

    // A new movie needs its title before anything is uploaded.
    if form.mode() == FormMode::Create {
        form.validate()?;
    }

    for (path, kind, slot) in [
        (args.poster, UploadKind::Thumbnail, UploadSlot::Poster),
        (args.file, UploadKind::Movie, UploadSlot::MovieFile),
        (args.trailer, UploadKind::Trailer, UploadSlot::TrailerVideo),
    ] {
        if let Some(path) = path {
            let url = upload(api, kind, &path, timeout).await?;
            form.attach_upload(slot, url);
        }
    }
    Ok(())
}

async fn login(config: &ClientConfig, api_url: &str) -> anyhow::Result<ApiClient> {
    let mut api = ApiClient::new(api_url)?;
    let (Some(username), Some(password)) = (&config.username, &config.password) else {
        bail!("Set MOVIEFLIX_USERNAME and MOVIEFLIX_PASSWORD to log in");
    };
    let admin = api.login(username, password).await?;
    tracing::info!("Logged in as {}", admin.username);
    Ok(api)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let timeout = cli.timeout.map(Duration::from_secs);

    let api_url = cli.api_url.unwrap_or(config.api_url.clone());

    if !cli.command.needs_session() {
        return run(&ApiClient::new(&api_url)?, cli.command, timeout).await;
    }

    let mut api = login(&config, &api_url).await?;
    let result = run(&api, cli.command, timeout).await;
    if let Err(e) = api.logout().await {
        tracing::warn!("Logout failed: {}", e);
    }
    result
}

async fn run(api: &ApiClient, command: Commands, timeout: Option<Duration>) -> anyhow::Result<()> {
    match command {
        Commands::List { genre } => print_json(&api.list_movies(genre.as_deref()).await?)?,
        Commands::Show { id } => match api.get_movie(id).await? {
            Some(detail) => print_json(&detail)?,
            None => bail!("Movie {} not found", id),
        },
        Commands::Upload { kind, path } => {
            let url = upload(api, kind, &path, timeout).await?;
            println!("{}", url);
        }
        Commands::AddMovie(args) => {
            let mut form = MovieForm::new();
            fill_movie_form(api, &mut form, args, timeout).await?;
            print_json(&form.submit(api).await?.movie())?;
        }
        Commands::EditMovie { id, fields } => {
            let mut form = MovieForm::patch(id);
            fill_movie_form(api, &mut form, fields, timeout).await?;
            print_json(&form.submit(api).await?.movie())?;
        }
        Commands::AddTrailer {
            movie_id,
            title,
            video,
            video_url,
            thumbnail,
        } => {
            let mut form = TrailerForm::for_movie(movie_id);
            form.fields.title = title;
            form.fields.video_url = video_url;
            if let Some(path) = video {
                let url = upload(api, UploadKind::Trailer, &path, timeout).await?;
                form.attach_upload(UploadSlot::TrailerVideo, url);
            }
            if let Some(path) = thumbnail {
                let url = upload(api, UploadKind::Thumbnail, &path, timeout).await?;
                form.attach_upload(UploadSlot::TrailerThumbnail, url);
            }
            print_json(&form.submit(api).await?)?;
        }
        Commands::DeleteMovie { id, yes } => {
            if !yes && !confirm(&format!("Delete movie {} and all its trailers?", id))? {
                bail!("Aborted");
            }
            api.delete(EntityKind::Movie, id).await?;
            println!("Deleted movie {}", id);
        }
        Commands::DeleteTrailer { id, yes } => {
            if !yes && !confirm(&format!("Delete trailer {}?", id))? {
                bail!("Aborted");
            }
            api.delete(EntityKind::Trailer, id).await?;
            println!("Deleted trailer {}", id);
        }
        Commands::Dashboard => print_json(&api.dashboard().await?)?,
    }
    Ok(())
}
