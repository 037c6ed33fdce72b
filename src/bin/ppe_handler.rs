//! ppe_handler - run the PPE detection pipeline for one upload event.
//!
//! This runner:
//! 1. Loads configuration from `PPE_CONFIG` and `PPE_*` overrides
//! 2. Reads one upload notification document (file or stdin)
//! 3. Fetches the object from the filesystem object store
//! 4. Replays the recorded vision service response for it
//! 5. Writes the report notification to the outbox
//! 6. Prints the object's content type

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

use ppe_witness::{
    parse_upload_event, FilesystemObjectStore, Handler, HandlerConfig, OutboxTransport,
    RecordedVisionService,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Produce a PPE detection report for one uploaded image"
)]
struct Args {
    /// Path to the upload notification JSON. Reads stdin when omitted.
    #[arg(long, env = "PPE_EVENT_PATH")]
    event: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = HandlerConfig::load()?;

    let payload = match &args.event {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read event {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read event from stdin")?;
            buf
        }
    };
    let event = parse_upload_event(&payload)?;

    log::info!(
        "objects={} detections={} outbox={}",
        cfg.storage.object_root.display(),
        cfg.storage.detections_dir.display(),
        cfg.storage.outbox_dir.display()
    );

    let mut handler = Handler::new(
        FilesystemObjectStore::new(&cfg.storage.object_root),
        RecordedVisionService::new(&cfg.storage.detections_dir),
        OutboxTransport::new(&cfg.storage.outbox_dir),
        cfg.detection.clone(),
        cfg.mail.clone(),
    );
    let content_type = handler.handle(&event)?;
    println!("{}", content_type);

    Ok(())
}
