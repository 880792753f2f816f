/// APIサーバー経由の請求書ストア
use super::BillStore;
use crate::features::bills::models::{AttachmentPayload, Bill, CreatedAttachment};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::info;
use reqwest::multipart;

/// 請求書のエンドポイント
const BILLS_ENDPOINT: &str = "/bills";

/// APIサーバー経由の請求書ストア
#[derive(Clone)]
pub struct HttpBillStore {
    client: ApiClient,
    auth_token: Option<String>,
}

impl HttpBillStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            auth_token: None,
        }
    }

    /// 認証トークンを設定する
    pub fn with_auth_token<S: Into<String>>(mut self, token: S) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// 添付ファイルのマルチパートフォームを構築する
    fn build_form(payload: &AttachmentPayload) -> AppResult<multipart::Form> {
        let part = multipart::Part::bytes(payload.data.clone())
            .file_name(payload.file_name.clone())
            .mime_str(&payload.content_type)
            .map_err(|e| AppError::validation(format!("MIMEタイプ設定エラー: {e}")))?;

        Ok(multipart::Form::new()
            .part("file", part)
            .text("email", payload.email.clone()))
    }
}

#[async_trait]
impl BillStore for HttpBillStore {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        let bills: Vec<Bill> = self
            .client
            .get(BILLS_ENDPOINT, self.auth_token.as_deref())
            .await?;

        info!("請求書一覧取得成功: count={}", bills.len());
        Ok(bills)
    }

    async fn create(&self, payload: &AttachmentPayload) -> AppResult<CreatedAttachment> {
        let form = Self::build_form(payload)?;
        let created: CreatedAttachment = self
            .client
            .post_multipart(BILLS_ENDPOINT, form, self.auth_token.as_deref())
            .await?;

        info!(
            "添付ファイル登録成功: key={}, file_name={}",
            created.key, payload.file_name
        );
        Ok(created)
    }

    async fn update(&self, bill: &Bill) -> AppResult<Bill> {
        if bill.id.is_empty() {
            return Err(AppError::validation("請求書のキーが設定されていません"));
        }

        let endpoint = format!("{BILLS_ENDPOINT}/{}", bill.id);
        let updated: Bill = self
            .client
            .patch(&endpoint, bill, self.auth_token.as_deref())
            .await?;

        info!("請求書更新成功: id={}", updated.id);
        Ok(updated)
    }
}
