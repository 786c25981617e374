use std::panic;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Environment-driven logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// `HM_LOG_DIR`: write `<dir>/<app>.log`, rotated daily, instead of stderr
    pub dir: Option<PathBuf>,
    /// `HM_LOG_INCLUDE_BACKTRACE`: also run the default panic hook
    pub include_backtrace: bool,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            dir: std::env::var_os("HM_LOG_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            include_backtrace: std::env::var("HM_LOG_INCLUDE_BACKTRACE")
                .map(|value| is_truthy(&value))
                .unwrap_or(false),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Routes panics through `tracing` so they land in the same sink as other
/// events. Only the first call installs the hook.
pub fn install_tracing_panic_hook(app_name: &'static str) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let include_backtrace = LogConfig::from_env().include_backtrace;
        let default_hook = panic::take_hook();

        panic::set_hook(Box::new(move |info| {
            let thread = std::thread::current();
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()));
            let payload = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".into());

            tracing::error!(
                application = app_name,
                thread = thread.name().unwrap_or("unnamed"),
                location = location.as_deref().unwrap_or("unknown"),
                panic_message = %payload,
                "panic captured"
            );

            if include_backtrace {
                default_hook(info);
            }
        }));
    });
}

fn file_writer(app_name: &str, dir: &Path) -> std::io::Result<BoxMakeWriter> {
    std::fs::create_dir_all(dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, format!("{app_name}.log")));
    let _ = LOG_GUARD.set(guard);
    Ok(BoxMakeWriter::new(writer))
}

/// Installs the global subscriber. Filtering comes from `RUST_LOG`
/// (default `info`); see [`LogConfig`] for the file sink.
pub fn init_tracing_subscriber(app_name: &'static str) {
    let config = LogConfig::from_env();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let Some(dir) = config.dir else {
        let _ = builder.with_writer(std::io::stderr).try_init();
        return;
    };

    match file_writer(app_name, &dir) {
        Ok(writer) => {
            let _ = builder.with_ansi(false).with_writer(writer).try_init();
        }
        Err(err) => {
            let _ = builder.with_writer(std::io::stderr).try_init();
            tracing::warn!(error = %err, dir = %dir.display(), "failed to create HM_LOG_DIR; logging to stderr");
        }
    }
}
