//! Logger Module
//! Global logger setup with flexi_logger.

use crate::config::AppConfig;
use flexi_logger::{
    Age, Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};

/// Start the global logger: daily rotated files in the configured directory,
/// mirrored to stderr. The returned handle must be kept alive until exit.
pub fn set_global_logger(config: &AppConfig) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(&config.log_spec)?
        .log_to_file(
            FileSpec::default()
                .directory(&config.log_dir)
                .basename("dashboard"),
        )
        .duplicate_to_stderr(Duplicate::Info)
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(7),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    Ok(handle)
}
