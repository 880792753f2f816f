/// ストア機能モジュール
///
/// 請求書の一覧取得・添付ファイル登録・更新を行うバックエンドの境界です。
/// - `HttpBillStore`: APIサーバー経由
/// - `InMemoryBillStore`: プロセス内（オフライン・開発用）
pub mod http;
pub mod memory;

#[cfg(test)]
pub mod testing;

use crate::features::bills::models::{AttachmentPayload, Bill, CreatedAttachment};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

pub use http::HttpBillStore;
pub use memory::{fixture_bills, InMemoryBillStore};

/// 請求書ストアのインターフェース
#[async_trait]
pub trait BillStore: Send + Sync {
    /// 現在のユーザーの請求書をすべて取得する
    async fn list(&self) -> AppResult<Vec<Bill>>;

    /// 添付ファイルを登録し、URLと請求書のキーを取得する
    async fn create(&self, payload: &AttachmentPayload) -> AppResult<CreatedAttachment>;

    /// 請求書レコードを保存し、保存後のレコードを返す
    async fn update(&self, bill: &Bill) -> AppResult<Bill>;
}
