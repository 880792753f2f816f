/// プロセス内の請求書ストア
///
/// APIサーバーが無い環境（オフライン・開発時）向けに、請求書と添付ファイルを
/// メモリ上に保持します。
use super::BillStore;
use crate::features::bills::models::{AttachmentPayload, Bill, BillStatus, CreatedAttachment};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::nanoid::generate_key;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use url::Url;

/// 添付ファイルURLのデフォルトのベース
const DEFAULT_FILE_BASE_URL: &str = "https://localhost:3456/images";

/// メモリ上の請求書ストア
#[derive(Debug)]
pub struct InMemoryBillStore {
    bills: Mutex<Vec<Bill>>,
    attachments: Mutex<HashMap<String, AttachmentPayload>>,
    file_base_url: String,
}

impl InMemoryBillStore {
    pub fn new(bills: Vec<Bill>) -> Self {
        Self {
            bills: Mutex::new(bills),
            attachments: Mutex::new(HashMap::new()),
            file_base_url: DEFAULT_FILE_BASE_URL.to_string(),
        }
    }

    /// サンプルの請求書4件で初期化する
    pub fn with_fixtures() -> Self {
        Self::new(fixture_bills())
    }

    /// 添付ファイルURLのベースを変更する
    pub fn with_file_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.file_base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// ファイル名をパスセグメントとしてエンコードしたURLを組み立てる
    fn file_url(&self, file_name: &str) -> AppResult<String> {
        let mut url = Url::parse(&self.file_base_url).map_err(|e| {
            AppError::configuration(format!("添付ファイルのベースURLが不正です: {e}"))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::configuration(format!(
                    "添付ファイルのベースURLにパスを追加できません: {}",
                    self.file_base_url
                ))
            })?
            .pop_if_empty()
            .push(file_name);
        Ok(url.into())
    }

    /// 登録済みの添付ファイルを取得する
    pub fn attachment(&self, key: &str) -> AppResult<Option<AttachmentPayload>> {
        Ok(lock(&self.attachments)?.get(key).cloned())
    }
}

impl Default for InMemoryBillStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|e| AppError::transport(format!("ストアのロック取得エラー: {e}")))
}

#[async_trait]
impl BillStore for InMemoryBillStore {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        Ok(lock(&self.bills)?.clone())
    }

    async fn create(&self, payload: &AttachmentPayload) -> AppResult<CreatedAttachment> {
        let key = generate_key();
        let file_url = self.file_url(&payload.file_name)?;

        lock(&self.attachments)?.insert(key.clone(), payload.clone());
        log::debug!("添付ファイルを登録しました: key={key}, file_url={file_url}");

        Ok(CreatedAttachment { file_url, key })
    }

    async fn update(&self, bill: &Bill) -> AppResult<Bill> {
        let mut bills = lock(&self.bills)?;

        match bills.iter_mut().find(|existing| existing.id == bill.id) {
            Some(existing) => *existing = bill.clone(),
            None => bills.push(bill.clone()),
        }

        Ok(bill.clone())
    }
}

/// サンプルの請求書（4件、すべて a@a のもの）
pub fn fixture_bills() -> Vec<Bill> {
    vec![
        Bill {
            id: "47qAXb6fIm2zOKkLzMro".to_string(),
            status: BillStatus::Pending,
            expense_type: "Hôtel et logement".to_string(),
            name: "encore".to_string(),
            date: "2004-04-04".to_string(),
            amount: 400.0,
            vat: Some(80.0),
            pct: Some(20),
            commentary: "séminaire billed".to_string(),
            comment_admin: Some("ok".to_string()),
            email: "a@a".to_string(),
            file_url: Some(
                "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/preview-facture-free-201801-pdf-1.jpg"
                    .to_string(),
            ),
            file_name: Some("preview-facture-free-201801-pdf-1.jpg".to_string()),
        },
        Bill {
            id: "BeKy5Mo4jkmdfPGYpTxZ".to_string(),
            status: BillStatus::Refused,
            expense_type: "Transports".to_string(),
            name: "test1".to_string(),
            date: "2001-01-01".to_string(),
            amount: 100.0,
            vat: None,
            pct: Some(20),
            commentary: "plop".to_string(),
            comment_admin: Some("en fait non".to_string()),
            email: "a@a".to_string(),
            file_url: Some(
                "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/1592770761.jpeg"
                    .to_string(),
            ),
            file_name: Some("1592770761.jpeg".to_string()),
        },
        Bill {
            id: "UIUZtnPQvnbFnB0ozvJh".to_string(),
            status: BillStatus::Accepted,
            expense_type: "Services en ligne".to_string(),
            name: "test3".to_string(),
            date: "2003-03-03".to_string(),
            amount: 300.0,
            vat: Some(60.0),
            pct: Some(20),
            commentary: String::new(),
            comment_admin: Some("bon bah d'accord".to_string()),
            email: "a@a".to_string(),
            file_url: Some(
                "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/facture-client-php-exportee.png"
                    .to_string(),
            ),
            file_name: Some("facture-client-php-exportee.png".to_string()),
        },
        Bill {
            id: "qcCK3SzECmaZAGRrHjaC".to_string(),
            status: BillStatus::Refused,
            expense_type: "Restaurants et bars".to_string(),
            name: "test2".to_string(),
            date: "2002-02-02".to_string(),
            amount: 200.0,
            vat: Some(40.0),
            pct: Some(20),
            commentary: "test2".to_string(),
            comment_admin: Some("pas la bonne facture".to_string()),
            email: "a@a".to_string(),
            file_url: Some(
                "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/preview-facture-free-201801-pdf-1.jpg"
                    .to_string(),
            ),
            file_name: Some("preview-facture-free-201801-pdf-1.jpg".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::utils::nanoid::is_valid_nanoid;

    fn payload() -> AttachmentPayload {
        AttachmentPayload {
            file_name: "test.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0xFF, 0xD8, 0xFF],
            email: "a@a".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_fixtures() {
        let store = InMemoryBillStore::with_fixtures();
        let bills = store.list().await.unwrap();

        assert_eq!(bills.len(), 4);
        assert!(bills.iter().all(|bill| bill.email == "a@a"));
    }

    #[tokio::test]
    async fn test_create_returns_url_and_key() {
        let store = InMemoryBillStore::default().with_file_base_url("https://files.test/");
        let created = store.create(&payload()).await.unwrap();

        assert_eq!(created.file_url, "https://files.test/test.jpg");
        assert!(is_valid_nanoid(&created.key));
        assert_eq!(store.attachment(&created.key).unwrap(), Some(payload()));
    }

    #[tokio::test]
    async fn test_create_encodes_file_name() {
        let store = InMemoryBillStore::default().with_file_base_url("https://files.test/images");
        let mut payload = payload();
        payload.file_name = "note de frais #1?.jpg".to_string();

        let created = store.create(&payload).await.unwrap();

        assert_eq!(
            created.file_url,
            "https://files.test/images/note%20de%20frais%20%231%3F.jpg"
        );
    }

    #[tokio::test]
    async fn test_create_with_invalid_base_url() {
        let store = InMemoryBillStore::default().with_file_base_url("not a url");

        let result = store.create(&payload()).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_update_inserts_then_replaces() {
        let store = InMemoryBillStore::with_fixtures();
        let mut bill = fixture_bills().remove(1);
        bill.id = "new-key".to_string();

        store.update(&bill).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 5);

        bill.status = BillStatus::Accepted;
        let updated = store.update(&bill).await.unwrap();
        assert_eq!(updated.status, BillStatus::Accepted);

        let bills = store.list().await.unwrap();
        assert_eq!(bills.len(), 5);
        assert_eq!(
            bills.iter().find(|b| b.id == "new-key").map(|b| b.status),
            Some(BillStatus::Accepted)
        );
    }
}
