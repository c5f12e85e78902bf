use std::io::Write;
use std::str::FromStr;

use chrono::Local;
use log::{Level, LevelFilter, Record, SetLoggerError};

use super::config_loader::LogConfig;

/// `[timestamp] [LEVEL] [target] [file:line] message`
#[derive(Debug, Clone, Copy)]
pub struct UnifiedLogFormatter { include_timestamps: bool, include_location: bool, color_enabled: bool }
impl UnifiedLogFormatter {
    pub fn new()->Self{ Self{ include_timestamps:true, include_location:true, color_enabled:true } }
    pub fn with_timestamps(mut self, en:bool)->Self{ self.include_timestamps=en; self }
    pub fn with_location(mut self, en:bool)->Self{ self.include_location=en; self }
    pub fn with_colors(mut self, en:bool)->Self{ self.color_enabled=en; self }
    pub fn from_config(config: &LogConfig)->Self{ Self::new().with_timestamps(config.timestamps).with_location(config.location).with_colors(config.colors) }
    pub fn format(&self, record: &Record<'_>)->String{
        let mut parts=Vec::new();
        if self.include_timestamps { parts.push(format!("[{}]", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))); }
        let level_str = if self.color_enabled { match record.level() { Level::Trace=>format!("\x1b[37m{}\x1b[0m", record.level()), Level::Debug=>format!("\x1b[36m{}\x1b[0m", record.level()), Level::Info=>format!("\x1b[32m{}\x1b[0m", record.level()), Level::Warn=>format!("\x1b[33m{}\x1b[0m", record.level()), Level::Error=>format!("\x1b[31m{}\x1b[0m", record.level()) } } else { record.level().to_string() };
        parts.push(format!("[{}]", level_str));
        parts.push(format!("[{}]", record.target()));
        if self.include_location { if let (Some(f), Some(l)) = (record.file(), record.line()) { parts.push(format!("[{}:{}]", f,l)); } }
        parts.push(record.args().to_string());
        parts.join(" ")
    }
}

impl Default for UnifiedLogFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs env_logger with the unified format. `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LogConfig) -> Result<(), SetLoggerError> {
    let level = LevelFilter::from_str(&config.level).unwrap_or(LevelFilter::Info);
    let formatter = UnifiedLogFormatter::from_config(config);

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(move |buf, record| writeln!(buf, "{}", formatter.format(record)))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_format() {
        let formatter = UnifiedLogFormatter::new().with_timestamps(false).with_colors(false);
        let line = formatter.format(
            &Record::builder()
                .args(format_args!("group appended"))
                .level(Level::Debug)
                .target("packt_rust::packet")
                .file(Some("format_base.rs"))
                .line(Some(42))
                .build(),
        );
        assert_eq!(line, "[DEBUG] [packt_rust::packet] [format_base.rs:42] group appended");
    }

    #[test]
    fn test_colored_level() {
        let formatter = UnifiedLogFormatter::new().with_timestamps(false).with_location(false);
        let line = formatter.format(
            &Record::builder()
                .args(format_args!("bad"))
                .level(Level::Error)
                .target("t")
                .build(),
        );
        assert_eq!(line, "[\x1b[31mERROR\x1b[0m] [t] bad");
    }
}
