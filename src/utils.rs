use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    // Profile is determined solely by the --dev CLI flag.
    fn app_name(self) -> &'static str {
        match self {
            Profile::Dev => "taskline-dev",
            Profile::Prod => "taskline",
        }
    }
}

/// Get the configuration directory path for taskline.
/// The Dev profile uses "taskline-dev" so a development build never touches
/// real data.
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "taskline", profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for taskline (save file and logs).
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "taskline", profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_use_separate_directories() {
        if let (Some(dev), Some(prod)) = (get_data_dir(Profile::Dev), get_data_dir(Profile::Prod))
        {
            assert_ne!(dev, prod);
        }
    }

    #[test]
    fn expand_path_leaves_plain_paths_alone() {
        assert_eq!(expand_path("/tmp/tasks.txt"), PathBuf::from("/tmp/tasks.txt"));
        assert_eq!(expand_path("relative/tasks.txt"), PathBuf::from("relative/tasks.txt"));
    }

    #[test]
    fn expand_path_resolves_tilde() {
        let expanded = expand_path("~/tasks.txt");
        if BaseDirs::new().is_some() {
            assert!(!expanded.to_string_lossy().starts_with('~'));
            assert!(expanded.ends_with("tasks.txt"));
        }
    }
}
