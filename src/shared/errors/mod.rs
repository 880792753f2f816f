use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// バリデーション関連のエラー（添付ファイル形式、入力値など）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// ストア（APIサーバー）呼び出しの失敗
    ///
    /// `message` はサーバーが返した文字列、またはステータスから組み立てた
    /// `Erreur {status}` 形式の文字列
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// リソースが見つからない場合のエラー
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// セッション（現在のユーザー）関連のエラー
    #[error("セッションエラー: {0}")]
    Session(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（外部サービス一時的エラーなど）
    Medium,
    /// 高重要度（設定エラーなど）
    High,
}

impl ErrorSeverity {
    /// 重要度に対応するログレベル
    pub fn log_level(&self) -> log::Level {
        match self {
            ErrorSeverity::Low => log::Level::Info,
            ErrorSeverity::Medium => log::Level::Warn,
            ErrorSeverity::High => log::Level::Error,
        }
    }
}

impl AppError {
    /// ユーザーに表示するためのメッセージを取得
    ///
    /// ストアの失敗はサーバー由来の文字列（例: `Erreur 404`）をそのまま返す
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg) => msg,
            AppError::Transport { message, .. } => message,
            AppError::NotFound(msg) => msg,
            AppError::Session(_) => "セッションが無効です。再度ログインしてください",
            AppError::Configuration(_) => "設定エラーが発生しました",
            AppError::Io(_) => "ファイル操作でエラーが発生しました",
            AppError::Json(_) => "データ形式の解析でエラーが発生しました",
        }
    }

    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::NotFound(_) => ErrorSeverity::Low,
            AppError::Transport { .. } => ErrorSeverity::Medium,
            AppError::Io(_) => ErrorSeverity::Medium,
            AppError::Json(_) => ErrorSeverity::Medium,
            AppError::Session(_) => ErrorSeverity::High,
            AppError::Configuration(_) => ErrorSeverity::High,
        }
    }

    /// HTTPステータス相当のコードを取得（ストアエラーの場合のみ）
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// バリデーションエラーを作成するヘルパー関数
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// ステータスコードからストアエラーを作成する
    ///
    /// # 引数
    /// * `status` - HTTPステータス相当のコード
    ///
    /// # 戻り値
    /// メッセージが `Erreur {status}` のストアエラー
    pub fn transport_status(status: u16) -> Self {
        AppError::Transport {
            status: Some(status),
            message: format!("Erreur {status}"),
        }
    }

    /// 任意のメッセージでストアエラーを作成する
    pub fn transport<S: Into<String>>(message: S) -> Self {
        AppError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// リソース未発見エラーを作成するヘルパー関数
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        AppError::NotFound(format!("{}が見つかりません", resource.into()))
    }

    /// セッションエラーを作成するヘルパー関数
    pub fn session<S: Into<String>>(message: S) -> Self {
        AppError::Session(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;
