use crate::shared::config::{get_environment, Environment};
use crate::shared::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// アプリケーションディレクトリ名
const APP_DIR_NAME: &str = "billed";

/// アプリケーション初期化の結果を表す構造体
#[derive(Debug)]
pub struct InitializationResult {
    /// 初回起動かどうか（セッションファイルが存在しない）
    pub is_first_run: bool,
    /// アプリケーションデータディレクトリのパス
    pub app_data_dir: PathBuf,
    /// セッションファイルのパス
    pub session_path: PathBuf,
    /// 実行環境
    pub environment: Environment,
}

/// アプリケーションの初期化を実行する
///
/// # 処理内容
/// 1. セッションファイルの場所を決定（`SESSION_STORAGE_PATH` が優先）
/// 2. 親ディレクトリの作成
/// 3. 初回起動の判定
pub fn initialize_application() -> AppResult<InitializationResult> {
    let environment = get_environment();

    let session_path = match crate::get_env_var_optional!("SESSION_STORAGE_PATH") {
        Some(path) => PathBuf::from(path),
        None => default_app_data_dir()?.join(environment.session_filename()),
    };

    let app_data_dir = session_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    ensure_directory(&app_data_dir)?;

    let is_first_run = !session_path.exists();
    if is_first_run {
        log::info!("=== アプリケーション初回起動 ===");
        log::info!("実行環境: {environment:?}");
        log::info!("セッションファイル: {session_path:?}");
    }

    Ok(InitializationResult {
        is_first_run,
        app_data_dir,
        session_path,
        environment,
    })
}

/// OSのデータディレクトリ配下のアプリケーションディレクトリを取得する
fn default_app_data_dir() -> AppResult<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::configuration("データディレクトリの取得に失敗しました"))
}

/// ディレクトリが存在しない場合は作成する
fn ensure_directory(dir: &Path) -> AppResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::configuration(format!("アプリデータディレクトリの作成に失敗: {e}"))
        })?;
        log::info!("アプリケーションデータディレクトリを作成しました: {dir:?}");
    }
    Ok(())
}

/// 初期化完了ログを出力する
pub fn log_initialization_complete(result: &InitializationResult) {
    if result.is_first_run {
        log::info!("初回起動の初期化が正常に完了しました");
    } else {
        log::info!("アプリケーション起動完了（既存セッションを使用）");
    }
    log::info!("環境: {:?}", result.environment);
    log::info!("セッション: {:?}", result.session_path);
}
