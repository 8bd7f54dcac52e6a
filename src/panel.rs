use crate::config::Settings;
use crate::error::Result;
use std::path::PathBuf;

/// Settings editor backed by the settings file; every change is persisted
/// immediately and answered with a status line
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    path: PathBuf,
    settings: Settings,
}

impl SettingsPanel {
    /// Open the settings file, showing defaults for anything unset
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = Settings::load_or_default(&path)?;
        Ok(Self { path, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change the save directory
    pub fn set_save_directory(&mut self, directory: &str) -> Result<&'static str> {
        self.settings.save_directory = directory.to_string();
        self.settings.save_to_file(&self.path)?;
        ::log::debug!("Save directory set to {:?}", directory);
        Ok("Settings saved!")
    }

    /// Switch auto-save on or off
    pub fn set_enabled(&mut self, enabled: bool) -> Result<&'static str> {
        self.settings.is_enabled = enabled;
        self.settings.save_to_file(&self.path)?;
        Ok(if enabled {
            "Auto-save enabled!"
        } else {
            "Auto-save disabled!"
        })
    }

    /// Current settings, one per line
    pub fn summary(&self) -> String {
        format!(
            "Save directory: {}\nAuto-save: {}",
            self.settings.save_directory,
            if self.settings.is_enabled { "enabled" } else { "disabled" }
        )
    }
}
