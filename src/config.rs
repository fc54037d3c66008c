use std::io::ErrorKind;

use crate::game::GameSettings;

/// Load settings from a YAML file. A missing file is not an error: the
/// defaults apply. A present file must parse and pass validation.
pub fn load_settings(file_path: &str) -> Result<GameSettings, String> {
    match std::fs::read_to_string(file_path) {
        Ok(content) => {
            let settings: GameSettings = serde_yaml_ng::from_str(&content)
                .map_err(|e| format!("Failed to parse settings file: {}", e))?;
            settings
                .validate()
                .map_err(|e| format!("Settings validation error: {}", e))?;
            Ok(settings)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(GameSettings::default()),
        Err(err) => Err(format!("Failed to read settings file: {}", err)),
    }
}

pub fn save_settings(file_path: &str, settings: &GameSettings) -> Result<(), String> {
    settings
        .validate()
        .map_err(|e| format!("Settings validation error: {}", e))?;
    let content = serde_yaml_ng::to_string(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;
    std::fs::write(file_path, content).map_err(|e| format!("Failed to write settings file: {}", e))
}
