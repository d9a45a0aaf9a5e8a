use crate::commands::{CmdMessage, CmdResult, NotasPaths};
use crate::config::NotasConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &NotasPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data;
    match action {
        ConfigAction::ShowAll => {
            let config = NotasConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = NotasConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = NotasConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e.to_string()));
                return Ok(result);
            }
            config.save(dir)?;
            let shown = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KEY_LONG_ABSENCE;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> NotasPaths {
        NotasPaths {
            data: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn show_all_returns_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let result = run(&paths(&dir), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(NotasConfig::default()));
    }

    #[test]
    fn set_then_show_key() {
        let dir = TempDir::new().unwrap();
        let p = paths(&dir);
        run(
            &p,
            ConfigAction::Set(KEY_LONG_ABSENCE.to_string(), "15".to_string()),
        )
        .unwrap();

        let result = run(&p, ConfigAction::ShowKey(KEY_LONG_ABSENCE.to_string())).unwrap();
        assert_eq!(result.messages[0].content, "15");
    }

    #[test]
    fn bad_value_is_an_error_message() {
        let dir = TempDir::new().unwrap();
        let result = run(
            &paths(&dir),
            ConfigAction::Set(KEY_LONG_ABSENCE.to_string(), "later".to_string()),
        )
        .unwrap();
        assert!(result.has_errors());
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn unknown_key_is_an_error_message() {
        let dir = TempDir::new().unwrap();
        let result = run(&paths(&dir), ConfigAction::ShowKey("theme".to_string())).unwrap();
        assert!(result.has_errors());
    }
}
