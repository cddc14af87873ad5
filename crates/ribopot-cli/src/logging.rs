use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{Layer, Registry, filter::LevelFilter, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Where log events go and how much of them, as chosen on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl LogSettings {
    /// `-q` keeps errors only; each `-v` lowers the threshold from WARN down to TRACE.
    pub fn from_flags(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Self {
        let level = if quiet {
            LevelFilter::ERROR
        } else {
            match verbosity {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };
        Self { level, log_file }
    }

    /// Installs the global subscriber. Fails if the log file cannot be created or a
    /// subscriber is already installed.
    pub fn init(self) -> Result<()> {
        let mut layers = vec![stderr_layer(self.level)];
        if let Some(path) = self.log_file {
            let file = File::create(&path).map_err(|source| CliError::LogFile { path, source })?;
            layers.push(file_layer(file, self.level));
        }
        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .map_err(|e| CliError::Logging(e.to_string()))
    }
}

fn stderr_layer(level: LevelFilter) -> BoxedLayer {
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(level)
        .boxed()
}

/// Plain-text layer for `--log-file`; thread ids identify the rayon worker that
/// handled each structure.
fn file_layer(file: File, level: LevelFilter) -> BoxedLayer {
    fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(level)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing::{debug, error, info, trace, warn};

    #[test]
    fn verbosity_flags_select_threshold() {
        let level = |v, q| LogSettings::from_flags(v, q, None).level;
        assert_eq!(level(0, false), LevelFilter::WARN);
        assert_eq!(level(1, false), LevelFilter::INFO);
        assert_eq!(level(2, false), LevelFilter::DEBUG);
        assert_eq!(level(9, false), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_still_lets_errors_through() {
        let level = LogSettings::from_flags(0, true, None).level;
        assert_eq!(level, LevelFilter::ERROR);
        assert!(tracing::Level::ERROR <= level);
        assert!(tracing::Level::WARN > level);
    }

    #[test]
    fn file_layer_honours_level_and_records_thread_ids() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("ribopot.log");
        let layer = file_layer(File::create(&log_path).unwrap(), LevelFilter::INFO);

        tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), || {
            info!("Counted 42 pair observation(s).");
            debug!("Scored model_7.pdb");
        });

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Counted 42 pair observation(s)."));
        assert!(content.contains("ThreadId"));
        assert!(!content.contains("model_7.pdb"));
        assert!(!content.contains("\u{1b}["), "file output must not contain ANSI escapes");
    }

    #[test]
    #[serial]
    fn second_initialization_is_rejected() {
        let _ = LogSettings::from_flags(3, false, None).init();
        error!("error event");
        warn!("warn event");
        trace!("trace event");

        let again = LogSettings::from_flags(0, false, None).init();
        assert!(matches!(again, Err(CliError::Logging(_))));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().to_path_buf();
        let result = LogSettings::from_flags(0, false, Some(target.clone())).init();
        match result {
            Err(CliError::LogFile { path, .. }) => assert_eq!(path, target),
            other => panic!("Expected log file error, got {:?}", other),
        }
    }
}
