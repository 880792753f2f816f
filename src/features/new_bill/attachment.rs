//! 添付ファイル（領収書画像）の検証
//!
//! ファイル入力で選択されたファイルの申告MIMEタイプを検査し、
//! アップロード用のペイロードを組み立てます。

use crate::features::bills::models::AttachmentPayload;
use crate::shared::errors::{AppError, AppResult};

/// 画像以外のファイルが選択された場合に表示するメッセージ
pub const INVALID_FILE_TYPE_MESSAGE: &str = "Veuillez choisir un fichier de type image";

/// ファイル名が空の場合に表示するメッセージ
pub const MISSING_FILE_NAME_MESSAGE: &str = "Le fichier sélectionné n'a pas de nom";

/// 受け付けるMIMEタイプ
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// ファイル入力で選択されたファイル
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    /// ブラウザ等が申告したMIMEタイプ（内容の検査は行わない）
    pub content_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new<N: Into<String>, C: Into<String>>(name: N, content_type: C, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// アップロード用のペイロードに変換する
    ///
    /// # 引数
    /// * `email` - 提出者のメールアドレス
    pub fn into_payload<S: Into<String>>(self, email: S) -> AttachmentPayload {
        AttachmentPayload {
            file_name: self.name,
            content_type: self.content_type,
            data: self.data,
            email: email.into(),
        }
    }
}

/// MIMEタイプが受け付け対象の画像かどうか
///
/// 大文字小文字を区別せず、`; charset=...` などのパラメータは無視する
pub fn is_accepted_image_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    ACCEPTED_IMAGE_TYPES.contains(&essence.as_str())
}

/// 選択されたファイルを検証する
///
/// # 戻り値
/// 受け付け可能な場合はOk(())、それ以外はバリデーションエラー
pub fn validate_selected_file(file: &SelectedFile) -> AppResult<()> {
    if file.name.trim().is_empty() {
        return Err(AppError::validation(MISSING_FILE_NAME_MESSAGE));
    }

    if !is_accepted_image_type(&file.content_type) {
        log::debug!(
            "受け付けないファイル形式です: name={}, type={}",
            file.name,
            file.content_type
        );
        return Err(AppError::validation(INVALID_FILE_TYPE_MESSAGE));
    }

    Ok(())
}
