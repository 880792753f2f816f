use crate::shared::errors::{AppError, AppResult};
use log::LevelFilter;

/// 実行環境
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// 環境ごとのセッションファイル名
    pub fn session_filename(&self) -> &'static str {
        match self {
            Environment::Development => "dev_session.json",
            Environment::Production => "session.json",
        }
    }

    /// `LOG_LEVEL` が無い場合のログレベル
    pub fn default_log_level(&self) -> LevelFilter {
        match self {
            Environment::Development => LevelFilter::Debug,
            Environment::Production => LevelFilter::Info,
        }
    }
}

/// 環境変数が見つからない
#[derive(Debug, Clone, thiserror::Error)]
#[error("環境変数 {var_name} が設定されていません")]
pub struct EnvVarError {
    pub var_name: String,
}

/// 環境変数を取得する
///
/// 起動時の環境変数を優先し、無ければビルド時に埋め込まれた値を使う
#[macro_export]
macro_rules! get_env_var {
    ($var_name:expr) => {{
        match std::env::var($var_name) {
            Ok(value) => Ok(value),
            Err(_) => match option_env!($var_name) {
                Some(value) => {
                    log::debug!("{} はビルド時の値を使用します", $var_name);
                    Ok(value.to_string())
                }
                None => Err($crate::shared::config::environment::EnvVarError {
                    var_name: $var_name.to_string(),
                }),
            },
        }
    }};
}

/// 環境変数を取得する（無ければNone）
#[macro_export]
macro_rules! get_env_var_optional {
    ($var_name:expr) => {{
        $crate::get_env_var!($var_name).ok()
    }};
}

/// 環境変数を取得する（無ければデフォルト値）
#[macro_export]
macro_rules! get_env_var_or_default {
    ($var_name:expr, $default_value:expr) => {{
        $crate::get_env_var!($var_name).unwrap_or_else(|_| $default_value.to_string())
    }};
}

/// 実行環境とログレベル
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: Environment,
    pub log_level: LevelFilter,
}

impl EnvironmentConfig {
    /// `ENVIRONMENT` と `LOG_LEVEL` から設定を読み込む
    pub fn from_env() -> Self {
        let environment = get_environment();
        let log_level = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|level| parse_log_level(&level))
            .unwrap_or_else(|| environment.default_log_level());

        Self {
            environment,
            log_level,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// ログレベル文字列を解釈する（大文字小文字は区別しない）
fn parse_log_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// 現在の実行環境を判定する
///
/// `ENVIRONMENT=production` ならプロダクション、未設定ならビルド種別で決める
pub fn get_environment() -> Environment {
    match std::env::var("ENVIRONMENT") {
        Ok(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
        Ok(_) => Environment::Development,
        Err(_) if cfg!(debug_assertions) => Environment::Development,
        Err(_) => Environment::Production,
    }
}

/// `.env` を読み込む（デバッグビルドのみ）
///
/// ログシステムの初期化前に呼ばれるため、結果は標準エラーに出力する
pub fn load_environment_variables() {
    if !cfg!(debug_assertions) {
        return;
    }

    match dotenv::dotenv() {
        Ok(path) => eprintln!("環境ファイルを読み込みました: {}", path.display()),
        Err(e) => eprintln!("環境ファイルを読み込めませんでした: {e}"),
    }
}

/// ログシステムを初期化する
///
/// 二重初期化（テストなど）はエラーにしない
pub fn initialize_logging_system() {
    let config = EnvironmentConfig::from_env();

    let initialized = env_logger::Builder::from_default_env()
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_target(false)
        .try_init();

    if initialized.is_ok() {
        log::info!(
            "ログシステムを初期化しました: level={}, environment={:?}",
            config.log_level,
            config.environment
        );
    }
}

/// API設定を管理する構造体
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// APIサーバーのベースURL
    pub base_url: String,
    /// APIリクエストのタイムアウト（秒）
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5678".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ApiConfig {
    /// 環境変数からAPI設定を読み込む
    ///
    /// # 戻り値
    /// 検証済みのAPI設定、必須の環境変数が無いか不正な場合はエラー
    pub fn from_env() -> AppResult<Self> {
        let base_url = crate::get_env_var!("API_SERVER_URL").map_err(|e| {
            AppError::configuration(format!(
                "API_SERVER_URLが設定されていません。.envファイルまたは環境変数を確認してください: {e}"
            ))
        })?;

        let timeout_seconds = crate::get_env_var_or_default!("API_TIMEOUT_SECONDS", "30")
            .parse()
            .unwrap_or_else(|_| {
                log::warn!(
                    "API_TIMEOUT_SECONDSのパースに失敗しました。デフォルト値30秒を使用します"
                );
                30
            });

        let config = Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_seconds,
        };
        config.validate()?;

        log::info!(
            "API設定: base_url={}, timeout={}s",
            config.base_url,
            config.timeout_seconds
        );
        Ok(config)
    }

    /// 設定を検証する
    pub fn validate(&self) -> AppResult<()> {
        if self.base_url.is_empty() {
            return Err(AppError::configuration(
                "APIサーバーのベースURLが設定されていません",
            ));
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| AppError::configuration(format!("APIサーバーのURLが不正です: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::configuration(format!(
                "APIサーバーのURLはhttpまたはhttpsである必要があります: {}",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "APIタイムアウトは0より大きい値である必要があります",
            ));
        }

        Ok(())
    }

    /// APIサーバーがlocalhostかどうかを判定
    pub fn is_localhost(&self) -> bool {
        url::Url::parse(&self.base_url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_string))
            .is_some_and(|host| host == "localhost" || host == "127.0.0.1")
    }
}
