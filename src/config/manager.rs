//! 設定管理を行うモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    Settings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: Settings,

    /// ロケールファイルのルートパス
    locale_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: Settings::default(), locale_root: None }
    }

    /// 設定を読み込む
    ///
    /// # Returns
    /// - `Ok(())`: 設定の読み込みとバリデーション成功
    /// - `Err(ConfigError)`: エラー
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, locale_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for locale root: {:?}", locale_root);

        let settings = if let Some(root) = &locale_root {
            loader::load_from_root(root)?.map_or_else(Settings::default, |found| {
                tracing::debug!("Loaded settings: {:?}", found);
                found
            })
        } else {
            Settings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.locale_root = locale_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &Settings {
        &self.current_settings
    }

    /// ロケールルートを取得
    #[must_use]
    pub const fn locale_root(&self) -> Option<&PathBuf> {
        self.locale_root.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings().reference_locale, "english");
        assert!(manager.locale_root().is_none());
    }

    /// load_settings: locale_root が None の場合
    #[rstest]
    fn test_load_settings_without_root() {
        let mut manager = ConfigManager::new();

        let result = manager.load_settings(None);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().reference_locale, "english");
        assert!(manager.locale_root().is_none());
    }

    /// load_settings: 設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"referenceLocale": "deutsch"}"#;
        fs::write(temp_dir.path().join(".webcal-i18n.json"), config_content).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().reference_locale, "deutsch");
        assert!(manager.locale_root().is_some());
    }

    /// load_settings: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().reference_locale, "english");
    }

    /// load_settings: 無効な設定でエラー
    #[rstest]
    fn test_load_settings_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"referenceLocale": ""}"#;
        fs::write(temp_dir.path().join(".webcal-i18n.json"), config_content).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_err());
    }
}
