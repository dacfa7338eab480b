//! `shipstash` command-line uploader.
//!
//! Assembles upload metadata from flags and the CI environment, runs
//! one upload invocation and prints where the build ended up.

use std::collections::HashMap;
use std::env;
use std::process::ExitCode;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shipstash_client::Client;
use shipstash_protocol::UploadMetadata;
use shipstash_uploader::{UploadEvent, Uploader};

#[derive(Parser, Debug)]
#[command(name = "shipstash", version, about = "Upload a build artifact")]
struct Args {
    /// Path of the primary artifact file.
    #[arg(long)]
    primary_file: String,

    /// Path of an optional expansion file (e.g. an Android OBB).
    #[arg(long)]
    expansion_file: Option<String>,

    /// Upload structure, "file" or "file+expansion".
    #[arg(long)]
    structure: Option<String>,

    /// Major version component.
    #[arg(long)]
    version_major: String,

    /// Minor version component.
    #[arg(long)]
    version_minor: String,

    /// Patch version component.
    #[arg(long)]
    version_patch: String,

    /// Pre-release component, e.g. "rc.1".
    #[arg(long)]
    version_extra: Option<String>,

    /// Build-metadata component, e.g. "build.5".
    #[arg(long)]
    version_meta: Option<String>,

    /// Custom build number.
    #[arg(long)]
    build_number: Option<String>,

    /// Target platform, e.g. "android".
    #[arg(long)]
    platform: String,

    /// Release stream the build belongs to.
    #[arg(long)]
    stream: String,

    /// Free-form build notes.
    #[arg(long)]
    notes: Option<String>,

    /// Labels, separated by commas or newlines.
    #[arg(long)]
    labels: Option<String>,

    /// Architectures, separated by commas or newlines.
    #[arg(long)]
    architectures: Option<String>,

    /// CI pipeline name.
    #[arg(long)]
    ci_pipeline: Option<String>,

    /// CI run id.
    #[arg(long)]
    ci_run_id: Option<String>,

    /// CI run URL.
    #[arg(long)]
    ci_run_url: Option<String>,

    /// CI pipeline URL.
    #[arg(long)]
    ci_pipeline_url: Option<String>,

    /// Build duration in milliseconds, reported as HH:MM:SS.
    #[arg(long)]
    build_duration_ms: Option<u64>,

    /// Version-control system, e.g. "git".
    #[arg(long)]
    vc_host_type: Option<String>,

    /// Repository hosting service, e.g. "github".
    #[arg(long)]
    vc_host: Option<String>,

    /// Repository name.
    #[arg(long)]
    vc_repo_name: Option<String>,

    /// Repository URL.
    #[arg(long)]
    vc_repo_url: Option<String>,

    /// Branch the build was made from.
    #[arg(long)]
    vc_branch: Option<String>,

    /// Commit the build was made from.
    #[arg(long)]
    vc_commit_sha: Option<String>,

    /// Web URL of the commit.
    #[arg(long)]
    vc_commit_url: Option<String>,

    /// Skip version-control detection from the environment.
    #[arg(long)]
    no_vc_detect: bool,

    /// API base URL override (also `SHIPSTASH_API_URL`).
    #[arg(long)]
    api_url: Option<String>,
}

/// Splits a comma or newline separated list, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split([',', '\r', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Formats a millisecond duration as HH:MM:SS.
fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60
    )
}

fn build_metadata(args: &Args) -> UploadMetadata {
    let mut meta = UploadMetadata::new(
        &args.primary_file,
        &args.version_major,
        &args.version_minor,
        &args.version_patch,
        &args.platform,
        &args.stream,
    );
    if let Some(structure) = &args.structure {
        meta.structure = structure.clone();
    } else if args.expansion_file.is_some() {
        meta.structure = "file+expansion".to_string();
    }
    meta.expansion_file_path = args.expansion_file.clone();
    meta.version_component_extra = args.version_extra.clone();
    meta.version_component_meta = args.version_meta.clone();
    meta.custom_build_number = args.build_number.clone();
    meta.notes = args.notes.clone();
    meta.labels = args.labels.as_deref().map(parse_list).unwrap_or_default();
    meta.architectures = args
        .architectures
        .as_deref()
        .map(parse_list)
        .unwrap_or_default();
    meta.source = Some("shipstash-cli".to_string());

    meta.ci_pipeline = args.ci_pipeline.clone();
    meta.ci_run_id = args.ci_run_id.clone();
    meta.ci_run_url = args.ci_run_url.clone();
    meta.ci_pipeline_url = args.ci_pipeline_url.clone();
    meta.ci_build_duration = args.build_duration_ms.map(format_duration);

    meta.vc_host_type = args.vc_host_type.clone();
    meta.vc_host = args.vc_host.clone();
    meta.vc_repo_name = args.vc_repo_name.clone();
    meta.vc_repo_url = args.vc_repo_url.clone();
    meta.vc_branch = args.vc_branch.clone();
    meta.vc_commit_sha = args.vc_commit_sha.clone();
    meta.vc_commit_url = args.vc_commit_url.clone();
    meta
}

/// Logs progress events until the channel closes.
fn spawn_progress_logger(mut events: mpsc::Receiver<UploadEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                UploadEvent::PlanRequested => info!("requesting upload plan"),
                UploadEvent::PlanReceived { pending_upload_id } => {
                    info!(pending_upload_id, "upload plan received")
                }
                UploadEvent::TransferStarted { file, chunked } => {
                    info!(file, chunked, "transfer started")
                }
                UploadEvent::PartUploaded { part, total } => {
                    info!("uploaded part {part} of {total}")
                }
                UploadEvent::TransferFinished { file } => info!(file, "transfer finished"),
                UploadEvent::Verifying => info!("verifying upload"),
                UploadEvent::Completed { .. } => {}
            }
        }
    })
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = env::var("SHIPSTASH_API_KEY").unwrap_or_default();
    if api_key.trim().is_empty() {
        return Err("SHIPSTASH_API_KEY is not set".into());
    }

    let mut metadata = build_metadata(&args);
    if !args.no_vc_detect {
        let ci_env: HashMap<String, String> = env::vars().collect();
        if let Some(provider) = shipstash_vcs_info::detect_provider(&ci_env) {
            shipstash_vcs_info::enrich_metadata(&mut metadata, provider.as_ref());
        }
    }

    let mut client = Client::new(&api_key)?;
    if let Some(url) = args.api_url.or_else(|| env::var("SHIPSTASH_API_URL").ok()) {
        client = client.with_base_url(url);
    }

    let (tx, rx) = mpsc::channel(32);
    let logger = spawn_progress_logger(rx);

    let uploader = Uploader::new(client);
    let record = uploader.upload(&metadata, &tx).await?;
    drop(tx);
    let _ = logger.await;

    println!(
        "{}",
        record.message.as_deref().unwrap_or("Upload verified")
    );
    if let Some(build_id) = &record.build_id {
        println!("Build id: {build_id}");
    }
    if record.pending_processing {
        println!("The build is still processing; links may take a moment to go live.");
    }
    if let Some(url) = &record.build_info_url {
        println!("Build info: {url}");
    }
    if let Some(url) = &record.download_url {
        println!("Download: {url}");
    }
    if let Some(platform) = record.platform_short_name() {
        println!("Platform: {platform}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("upload failed: {err}");
            ExitCode::FAILURE
        }
    }
}
