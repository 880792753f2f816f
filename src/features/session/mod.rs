/// セッション機能モジュール
///
/// 現在のユーザー（種別とメールアドレス）と、それを保存する
/// ファイルベースのキー・値ストレージを提供します。
pub mod models;
pub mod storage;

pub use models::{CurrentUser, Session, UserType};
pub use storage::{SessionStorage, StorageKeys};
