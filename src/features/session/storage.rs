/// セッションストレージモジュール
///
/// JSONファイルに文字列のキー・値を保存する永続ストレージ。
/// 現在のユーザーは `user` キーにJSON文字列として保存される。
use super::models::{CurrentUser, Session};
use crate::shared::errors::{AppError, AppResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// ストレージのキー定義
pub struct StorageKeys;

impl StorageKeys {
    /// 現在のユーザーのキー
    pub const USER: &'static str = "user";
}

/// ファイルベースのキー・値ストレージ
#[derive(Debug)]
pub struct SessionStorage {
    /// 保存先ファイルのパス
    path: PathBuf,
    /// メモリ上のエントリ
    entries: BTreeMap<String, String>,
}

impl SessionStorage {
    /// ストレージを開く（ファイルが無い場合は空で開始する）
    ///
    /// # 引数
    /// * `path` - 保存先ファイルのパス
    ///
    /// # 戻り値
    /// SessionStorageインスタンス、ファイルが壊れている場合はエラー
    pub fn open<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        log::debug!(
            "セッションストレージを開きました: path={path:?}, entries={}",
            entries.len()
        );
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// 値を保存してファイルに書き込む
    pub fn set_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    pub fn remove_item(&mut self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        self.save()
    }

    /// すべてのエントリを削除する
    pub fn clear(&mut self) -> AppResult<()> {
        self.entries.clear();
        log::warn!("セッションストレージをクリアしました");
        self.save()
    }

    /// 現在のユーザーを保存する
    pub fn save_current_user(&mut self, user: &CurrentUser) -> AppResult<()> {
        let value = serde_json::to_string(user)?;
        self.set_item(StorageKeys::USER, &value)?;
        log::info!("現在のユーザーを保存しました: type={:?}", user.user_type);
        Ok(())
    }

    /// 現在のユーザーを取得する
    ///
    /// # 戻り値
    /// 保存されていない場合はNone、JSONが不正な場合はエラー
    pub fn load_current_user(&self) -> AppResult<Option<CurrentUser>> {
        match self.get_item(StorageKeys::USER) {
            Some(value) => Ok(Some(serde_json::from_str(value)?)),
            None => Ok(None),
        }
    }

    /// 保存されたユーザーからセッションを作成する
    pub fn load_session(&self) -> AppResult<Session> {
        self.load_current_user()?
            .map(Session::new)
            .ok_or_else(|| AppError::session("ユーザーがログインしていません"))
    }

    fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
