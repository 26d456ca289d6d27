use std::path::PathBuf;
use std::sync::OnceLock;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the logs directory: `<exe_dir>/logs/`
pub fn get_logs_dir() -> PathBuf {
    get_exe_dir().join("logs")
}

/// Returns the data directory: `<exe_dir>/Data/`
///
/// Holds the result log and the all-time statistics file.
pub fn get_data_dir() -> PathBuf {
    get_exe_dir().join("Data")
}

/// Returns the diagnostics directory: `<exe_dir>/diagnostics/`
pub fn get_diagnostics_dir() -> PathBuf {
    get_exe_dir().join("diagnostics")
}

/// Returns the path of the human-readable status file.
pub fn get_info_text_path() -> PathBuf {
    get_exe_dir().join("sessionInfo.txt")
}

/// Returns the path of the configuration file.
pub fn get_config_path() -> PathBuf {
    get_exe_dir().join("config.json")
}

/// Ensures all output directories exist. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_logs_dir())?;
    std::fs::create_dir_all(get_data_dir())?;
    std::fs::create_dir_all(get_diagnostics_dir())?;
    Ok(())
}
