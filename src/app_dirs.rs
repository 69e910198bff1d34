use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "escaperoom";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("escaperoom_config.json"))
    }

    /// Where the log file goes: the platform data dir, else the working directory.
    pub fn log_dir() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_ends_in_json() {
        let path = AppDirs::config_path();
        assert_eq!(
            path.extension().and_then(|e| e.to_str()),
            Some("json")
        );
    }

    #[test]
    fn log_dir_is_app_specific_or_cwd() {
        let dir = AppDirs::log_dir();
        assert!(dir.to_string_lossy().contains(APP_NAME) || dir == PathBuf::from("."));
    }

    #[test]
    fn log_dir_follows_platform_data_dir() {
        if let Some(pd) = ProjectDirs::from("", "", APP_NAME) {
            assert_eq!(AppDirs::log_dir(), pd.data_local_dir());
        }
    }
}
