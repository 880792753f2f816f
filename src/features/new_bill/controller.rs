/// 請求書作成フォームのコントローラー
///
/// 添付ファイルの選択を検証し、送信時に添付ファイルの登録と
/// 請求書レコードの更新を順に行います。
use super::attachment::{validate_selected_file, SelectedFile, INVALID_FILE_TYPE_MESSAGE};
use super::models::{NewBillForm, NewBillState};
use crate::features::bills::models::{AttachmentPayload, Bill};
use crate::features::routing::{Navigator, Route};
use crate::features::session::Session;
use crate::features::store::BillStore;
use crate::shared::errors::{AppError, AppResult};
use log::{debug, error, info, log, warn};
use std::sync::Arc;

/// ブロッキングなアラートを表示する
pub trait Alerter: Send + Sync {
    fn alert(&self, message: &str);
}

/// 作成フォームが提供する表示操作
pub trait NewBillView: Alerter {
    /// ファイル入力を空に戻す
    fn clear_file_input(&self);
}

/// 請求書作成のコントローラー
pub struct NewBillController {
    session: Session,
    store: Arc<dyn BillStore>,
    navigator: Arc<dyn Navigator>,
    view: Arc<dyn NewBillView>,
    state: NewBillState,
    file_name: Option<String>,
    is_file_valid: bool,
    payload: Option<AttachmentPayload>,
}

impl NewBillController {
    /// 新しいコントローラーを作成する
    ///
    /// # 引数
    /// * `session` - 現在のセッション（従業員である必要がある）
    /// * `store` - 請求書ストア
    /// * `navigator` - 画面遷移
    /// * `view` - 作成フォーム
    pub fn new(
        session: Session,
        store: Arc<dyn BillStore>,
        navigator: Arc<dyn Navigator>,
        view: Arc<dyn NewBillView>,
    ) -> AppResult<Self> {
        session.require_employee()?;

        Ok(Self {
            session,
            store,
            navigator,
            view,
            state: NewBillState::Idle,
            file_name: None,
            is_file_valid: false,
            payload: None,
        })
    }

    pub fn state(&self) -> NewBillState {
        self.state
    }

    pub fn is_file_valid(&self) -> bool {
        self.is_file_valid
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// ファイル入力の変更を処理する
    ///
    /// 先頭のファイルの申告MIMEタイプのみを検査する。画像以外の場合は
    /// アラートを1回表示し、ファイル入力を空に戻す。
    ///
    /// # 戻り値
    /// 変更後の状態
    pub fn handle_change_file(&mut self, files: Vec<SelectedFile>) -> NewBillState {
        self.reset_file();

        let Some(file) = files.into_iter().next() else {
            debug!("ファイルの選択が解除されました");
            self.state = NewBillState::Idle;
            return self.state;
        };

        match validate_selected_file(&file) {
            Ok(()) => {
                info!("添付ファイルを選択しました: name={}", file.name);
                // メールアドレスが無いセッションは送信時に拒否される
                let email = match self.session.require_email() {
                    Ok(email) => email.to_string(),
                    Err(e) => {
                        warn!("添付ファイルに提出者を設定できません: {e}");
                        String::new()
                    }
                };
                self.file_name = Some(file.name.clone());
                self.is_file_valid = true;
                self.payload = Some(file.into_payload(email));
                self.state = NewBillState::FileSelected;
            }
            Err(e) => {
                warn!(
                    "添付ファイルを受け付けませんでした: name={}, type={}",
                    file.name, file.content_type
                );
                self.view.alert(e.user_message());
                self.view.clear_file_input();
                self.state = NewBillState::Rejected;
            }
        }

        self.state
    }

    /// フォームの送信を処理する
    ///
    /// 添付ファイルを登録し、返されたキーをIDとして請求書を更新する。
    /// 成功すると一覧へ遷移する。ストアの失敗はログに記録し、遷移しない。
    ///
    /// # 戻り値
    /// 作成された請求書、失敗した場合はエラー
    pub async fn handle_submit(&mut self, form: NewBillForm) -> AppResult<Bill> {
        let payload = match (&self.payload, self.is_file_valid) {
            (Some(payload), true) => payload.clone(),
            _ => {
                warn!("有効な添付ファイルが無いまま送信されました");
                return Err(self.reject(AppError::validation(INVALID_FILE_TYPE_MESSAGE)));
            }
        };

        if let Err(e) = form.validate() {
            return Err(self.reject(e));
        }

        let email = self.session.require_email()?.to_string();
        self.state = NewBillState::Submitting;

        match self.create_and_update(form, &payload, &email).await {
            Ok(bill) => {
                info!("請求書を作成しました: id={}, email={}", bill.id, bill.email);
                self.state = NewBillState::Done;
                self.navigator.navigate(Route::Bills);
                Ok(bill)
            }
            Err(e) => {
                error!(
                    "請求書の作成に失敗しました: {e} (severity={:?})",
                    e.severity()
                );
                self.state = NewBillState::SubmitFailed;
                Err(e)
            }
        }
    }

    async fn create_and_update(
        &self,
        form: NewBillForm,
        payload: &AttachmentPayload,
        email: &str,
    ) -> AppResult<Bill> {
        let created = self.store.create(payload).await?;
        debug!("添付ファイルを登録しました: key={}", created.key);

        let bill = form.into_bill(created, email, &payload.file_name);
        self.store.update(&bill).await
    }

    fn reject(&self, e: AppError) -> AppError {
        log!(e.severity().log_level(), "送信を受け付けませんでした: {e}");
        self.view.alert(e.user_message());
        e
    }

    fn reset_file(&mut self) {
        self.file_name = None;
        self.is_file_valid = false;
        self.payload = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bills::models::BillStatus;
    use crate::features::routing::HistoryNavigator;
    use crate::features::session::{CurrentUser, UserType};
    use crate::features::store::testing::{MockStore, StoreCall};
    use crate::features::store::InMemoryBillStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingView {
        alerts: Mutex<Vec<String>>,
        clears: Mutex<usize>,
    }

    impl RecordingView {
        fn alerts(&self) -> Vec<String> {
            self.alerts.lock().unwrap().clone()
        }

        fn clears(&self) -> usize {
            *self.clears.lock().unwrap()
        }
    }

    impl Alerter for RecordingView {
        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }
    }

    impl NewBillView for RecordingView {
        fn clear_file_input(&self) {
            *self.clears.lock().unwrap() += 1;
        }
    }

    struct Fixture {
        controller: NewBillController,
        store: Arc<MockStore>,
        navigator: Arc<HistoryNavigator>,
        view: Arc<RecordingView>,
    }

    fn fixture(store: MockStore) -> Fixture {
        let store = Arc::new(store);
        let navigator = Arc::new(HistoryNavigator::new(Route::NewBill));
        let view = Arc::new(RecordingView::default());
        let controller = NewBillController::new(
            Session::employee("a@a"),
            store.clone(),
            navigator.clone(),
            view.clone(),
        )
        .unwrap();

        Fixture {
            controller,
            store,
            navigator,
            view,
        }
    }

    fn jpeg() -> SelectedFile {
        SelectedFile::new("test.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn form() -> NewBillForm {
        NewBillForm {
            expense_type: "Transports".to_string(),
            name: "Vol Paris Londres".to_string(),
            date: "2022-02-02".to_string(),
            amount: 348.0,
            vat: Some(70.0),
            pct: None,
            commentary: String::new(),
        }
    }

    #[test]
    fn test_admin_session_is_rejected() {
        let admin = Session::new(CurrentUser {
            user_type: UserType::Admin,
            email: Some("admin@a".to_string()),
        });
        let result = NewBillController::new(
            admin,
            Arc::new(MockStore::new()),
            Arc::new(HistoryNavigator::default()),
            Arc::new(RecordingView::default()),
        );

        assert!(matches!(result, Err(AppError::Session(_))));
    }

    #[test]
    fn test_image_files_are_accepted_without_alert() {
        for file in [
            jpeg(),
            SelectedFile::new("test.png", "image/png", vec![0x89, 0x50]),
        ] {
            let mut f = fixture(MockStore::new());
            let name = file.name.clone();

            let state = f.controller.handle_change_file(vec![file]);

            assert_eq!(state, NewBillState::FileSelected);
            assert!(f.controller.is_file_valid());
            assert_eq!(f.controller.file_name(), Some(name.as_str()));
            assert!(f.view.alerts().is_empty());
            assert_eq!(f.view.clears(), 0);
        }
    }

    #[test]
    fn test_non_image_file_alerts_once() {
        let mut f = fixture(MockStore::new());

        let state = f
            .controller
            .handle_change_file(vec![SelectedFile::new("test.pdf", "document/pdf", vec![0x25])]);

        assert_eq!(state, NewBillState::Rejected);
        assert!(!f.controller.is_file_valid());
        assert_eq!(f.controller.file_name(), None);
        assert_eq!(f.view.alerts(), vec![INVALID_FILE_TYPE_MESSAGE.to_string()]);
        assert_eq!(f.view.clears(), 1);
    }

    #[test]
    fn test_rejected_file_replaces_previous_selection() {
        let mut f = fixture(MockStore::new());
        f.controller.handle_change_file(vec![jpeg()]);

        f.controller
            .handle_change_file(vec![SelectedFile::new("a.gif", "image/gif", Vec::new())]);

        assert!(!f.controller.is_file_valid());
        assert_eq!(f.controller.state(), NewBillState::Rejected);
    }

    #[test]
    fn test_empty_selection_returns_to_idle() {
        let mut f = fixture(MockStore::new());
        f.controller.handle_change_file(vec![jpeg()]);

        assert_eq!(f.controller.handle_change_file(Vec::new()), NewBillState::Idle);
        assert!(!f.controller.is_file_valid());
        assert!(f.view.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_submit_creates_then_updates_and_navigates() {
        let mut f = fixture(MockStore::new());
        f.controller.handle_change_file(vec![jpeg()]);

        let bill = f.controller.handle_submit(form()).await.unwrap();

        assert_eq!(bill.id, "1234");
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.pct, Some(20));
        assert_eq!(bill.email, "a@a");
        assert_eq!(
            bill.file_url.as_deref(),
            Some("https://localhost:3456/images/test.jpg")
        );

        let calls = f.store.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            StoreCall::Create(payload) => {
                assert_eq!(payload.file_name, "test.jpg");
                assert_eq!(payload.email, "a@a");
            }
            other => panic!("最初の呼び出しはcreateであるべき: {other:?}"),
        }
        assert_eq!(calls[1], StoreCall::Update(bill));

        assert_eq!(f.controller.state(), NewBillState::Done);
        assert_eq!(f.navigator.current(), Route::Bills);
    }

    #[tokio::test]
    async fn test_submit_update_404_does_not_navigate() {
        let mut f = fixture(MockStore::failing_update(404));
        f.controller.handle_change_file(vec![jpeg()]);

        let result = f.controller.handle_submit(form()).await;

        match result {
            Err(e) => assert_eq!(e.user_message(), "Erreur 404"),
            Ok(bill) => panic!("失敗するべき: {bill:?}"),
        }
        assert_eq!(f.controller.state(), NewBillState::SubmitFailed);
        assert!(f.controller.is_file_valid());
        assert_eq!(f.navigator.history(), vec![Route::NewBill]);
        // ストアの失敗はアラートではなくログで扱う
        assert!(f.view.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_submit_update_500_does_not_navigate() {
        let mut f = fixture(MockStore::failing_update(500));
        f.controller.handle_change_file(vec![jpeg()]);

        let result = f.controller.handle_submit(form()).await;

        assert_eq!(result.map_err(|e| e.status()).err(), Some(Some(500)));
        assert_eq!(f.navigator.current(), Route::NewBill);
    }

    #[tokio::test]
    async fn test_submit_create_failure_skips_update() {
        let mut f = fixture(MockStore::failing_create(500));
        f.controller.handle_change_file(vec![jpeg()]);

        assert!(f.controller.handle_submit(form()).await.is_err());

        assert_eq!(f.store.calls().len(), 1);
        assert!(matches!(f.store.calls()[0], StoreCall::Create(_)));
        assert_eq!(f.controller.state(), NewBillState::SubmitFailed);
    }

    #[tokio::test]
    async fn test_submit_without_file_is_rejected() {
        let mut f = fixture(MockStore::new());

        let result = f.controller.handle_submit(form()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(f.store.calls().is_empty());
        assert_eq!(f.view.alerts(), vec![INVALID_FILE_TYPE_MESSAGE.to_string()]);
        assert_eq!(f.navigator.current(), Route::NewBill);
    }

    #[tokio::test]
    async fn test_submit_after_rejected_file_is_rejected() {
        let mut f = fixture(MockStore::new());
        f.controller
            .handle_change_file(vec![SelectedFile::new("test.pdf", "document/pdf", Vec::new())]);

        assert!(f.controller.handle_submit(form()).await.is_err());
        assert!(f.store.calls().is_empty());
        assert_eq!(f.view.alerts().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_without_session_email_is_rejected() {
        let store = Arc::new(MockStore::new());
        let navigator = Arc::new(HistoryNavigator::new(Route::NewBill));
        let mut controller = NewBillController::new(
            Session::new(CurrentUser {
                user_type: UserType::Employee,
                email: None,
            }),
            store.clone(),
            navigator.clone(),
            Arc::new(RecordingView::default()),
        )
        .unwrap();

        assert_eq!(
            controller.handle_change_file(vec![jpeg()]),
            NewBillState::FileSelected
        );
        let result = controller.handle_submit(form()).await;

        assert!(matches!(result, Err(AppError::Session(_))));
        assert!(store.calls().is_empty());
        assert_eq!(navigator.current(), Route::NewBill);
    }

    #[tokio::test]
    async fn test_submit_with_invalid_date_is_rejected() {
        let mut f = fixture(MockStore::new());
        f.controller.handle_change_file(vec![jpeg()]);
        let mut form = form();
        form.date = "02/02/2022".to_string();

        let result = f.controller.handle_submit(form).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(f.store.calls().is_empty());
        assert_eq!(f.controller.state(), NewBillState::FileSelected);
    }

    #[tokio::test]
    async fn test_submit_with_in_memory_store() {
        let store = Arc::new(InMemoryBillStore::with_fixtures());
        let navigator = Arc::new(HistoryNavigator::new(Route::NewBill));
        let mut controller = NewBillController::new(
            Session::employee("a@a"),
            store.clone(),
            navigator.clone(),
            Arc::new(RecordingView::default()),
        )
        .unwrap();
        controller.handle_change_file(vec![jpeg()]);

        let bill = controller.handle_submit(form()).await.unwrap();

        let bills = store.list().await.unwrap();
        assert_eq!(bills.len(), 5);
        assert!(bills.iter().any(|b| b.id == bill.id));
        assert!(store.attachment(&bill.id).unwrap().is_some());
        assert_eq!(navigator.current(), Route::Bills);
    }
}
