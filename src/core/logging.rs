//! Logging setup.
//!
//! - A daily rolling JSON log file under `<data_dir>/logs`
//! - `log` macros bridged into `tracing`
//! - Rolled-over files gzip-compressed in the background

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "seconboard.log";

/// Initialize logging for TUI mode.
///
/// File output only: a stdout layer would corrupt the terminal while
/// ratatui holds the alternate screen. Returns a `WorkerGuard` which must
/// be kept alive so buffered log lines are flushed on shutdown.
pub fn init_tui(log_dir: &Path) -> WorkerGuard {
    let (non_blocking, guard) = file_writer(log_dir);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    tracing_subscriber::registry().with(file_layer).init();

    finish_init(log_dir);
    guard
}

fn file_writer(
    log_dir: &Path,
) -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard) {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    tracing_appender::non_blocking(file_appender)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn finish_init(log_dir: &Path) {
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    let dir = log_dir.to_path_buf();
    std::thread::spawn(move || {
        compress_old_logs(&dir);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );
}

/// Compress every rolled log except today's.
pub fn compress_old_logs(log_dir: &Path) -> usize {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut compressed = 0;

    let Ok(entries) = fs::read_dir(log_dir) else {
        return 0;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let rolled = name
            .strip_prefix(LOG_FILE_PREFIX)
            .is_some_and(|rest| rest.starts_with('.'));
        if !rolled || name.ends_with(&today_suffix) || name.ends_with(".gz") {
            continue;
        }

        match compress_file(&path) {
            Ok(()) => {
                log::info!("Compressed old log: {:?}", path);
                compressed += 1;
            }
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
    compressed
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path: PathBuf = path
        .parent()
        .ok_or_else(|| io::Error::other("No parent directory"))?
        .join(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(())
}
