use chrono::Local;
use simplelog::*;
use std::fs::File;
use std::path::PathBuf;

/// Where log records go and from which level on.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingOptions {
    pub level: LevelFilter,
    pub log_to_console: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            log_to_console: true,
            log_file: None,
        }
    }
}

/// log_<date>_<time>.txt in the working directory
pub fn timestamped_log_name() -> PathBuf {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    PathBuf::from(format!("log_{}.txt", date_and_time))
}

/// Installs a CombinedLogger of a terminal logger and an optional file logger.
/// Returns false when nothing was installed: no sink requested, or a logger is already set.
pub fn init_logger(options: &LoggingOptions) -> bool {
    let level = options.level;
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if options.log_to_console {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if let Some(ref filename) = options.log_file {
        match File::create(filename) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(e) => eprintln!("cannot create log file {:?}: {}", filename, e),
        }
    }
    if loggers.is_empty() {
        return false;
    }
    CombinedLogger::init(loggers).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamped_name_has_log_prefix() {
        let name = timestamped_log_name();
        let name = name.to_str().unwrap();
        assert!(name.starts_with("log_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn no_sinks_installs_nothing() {
        let options = LoggingOptions {
            level: LevelFilter::Debug,
            log_to_console: false,
            log_file: None,
        };
        assert!(!init_logger(&options));
        assert_eq!(LoggingOptions::default().level, LevelFilter::Info);
    }
}
