//! First-run setup

use tracing::info;

use crate::config::paths::SiteBidPaths;
use crate::config::settings::Settings;
use crate::error::SiteBidError;

use super::file_io::write_json_atomic;

/// Create the directory layout, default settings and empty data files
///
/// Existing files are left untouched, so running it twice is harmless.
pub fn initialize_storage(paths: &SiteBidPaths) -> Result<bool, SiteBidError> {
    paths.ensure_directories()?;

    let fresh = !paths.is_initialized();
    if fresh {
        Settings::default().save(paths)?;
    }

    let empty = [
        (paths.projects_file(), "projects"),
        (paths.orders_file(), "records"),
        (paths.labor_file(), "records"),
        (paths.expenses_file(), "records"),
    ];
    for (path, key) in empty {
        if !path.exists() {
            write_json_atomic(&path, &serde_json::json!({ key: [] }))?;
        }
    }

    if fresh {
        info!(base_dir = %paths.base_dir().display(), "initialized storage");
    }
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SiteBidPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(initialize_storage(&paths).unwrap());
        assert!(paths.settings_file().exists());
        assert!(paths.projects_file().exists());
        assert!(paths.labor_file().exists());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SiteBidPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();
        let mut settings = Settings::load_or_create(&paths).unwrap();
        settings.currency_symbol = "$".into();
        settings.save(&paths).unwrap();

        assert!(!initialize_storage(&paths).unwrap());
        assert_eq!(Settings::load_or_create(&paths).unwrap().currency_symbol, "$");
    }
}
