//! Gim entrypoint.
use anyhow::{Context, Result};
use core_config::Config;
use core_render::VERSION;
use core_terminal::posix::emergency_restore;
use core_terminal::PosixDriver;
use session::{EditorSession, abort_setup, capture_terminal};
use std::ffi::OsStr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

mod session;

/// Route `tracing` output to the configured log file; the terminal itself belongs to
/// the editor. The returned guard must live until shutdown so buffered lines flush.
fn configure_logging(log_path: &Path) -> Option<WorkerGuard> {
    let (log_dir, file_name) = split_log_path(log_path)?;
    if log_path.exists() {
        let _ = std::fs::remove_file(log_path);
    }

    // Unwritable directory: run without file logging rather than abort.
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(log_dir)
        .ok()?;
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_err) => None,
    }
}

/// Directory and file name for the appender; a bare file name lives in `.`.
fn split_log_path(log_path: &Path) -> Option<(&Path, &OsStr)> {
    let file_name = log_path.file_name()?;
    let log_dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Some((log_dir, file_name))
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            // Cooked mode first so the panic message prints with normal line handling.
            emergency_restore();
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn run(config: &Config) -> Result<()> {
    let mut driver = PosixDriver::new();
    let controller = capture_terminal(&mut driver).context("capturing terminal attributes")?;
    if let Err(e) = driver.install_emergency_restore(controller.original()) {
        abort_setup(&mut driver, Some(&controller));
        return Err(e).context("installing terminal restore handlers");
    }
    let session =
        EditorSession::start(controller, driver, config).context("starting editor session")?;
    let state = session.run().context("editor session failed")?;
    info!(
        target: "runtime",
        row = state.cursor().row,
        col = state.cursor().col,
        "final_cursor"
    );
    Ok(())
}

fn main() -> ExitCode {
    let config = core_config::load_from(None).unwrap_or_default();
    let _log_guard = configure_logging(config.log_file());
    install_panic_hook();

    let config_path = config.path.as_ref().map(|p| p.to_string_lossy().to_string());
    info!(
        target: "runtime",
        version = VERSION,
        config = config_path.as_deref(),
        read_timeout_ms = config.file.input.timeout_ms,
        clamp_cursor = config.clamp_cursor(),
        "startup"
    );

    match run(&config) {
        Ok(()) => {
            info!(target: "runtime", "shutdown");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(target: "runtime", error = %format!("{err:#}"), "fatal");
            eprintln!("gim: {err:#}");
            ExitCode::FAILURE
        }
    }
}
