/// 請求書一覧のコントローラー
///
/// ストアから現在のユーザーの請求書を取得して新しい順に並べ、
/// 行ごとの操作（添付ファイルのプレビュー、作成フォームへの遷移）を扱います。
use super::models::{Bill, BillRow};
use super::ordering::sort_by_date_descending;
use super::views::BillsPage;
use crate::features::routing::{Navigator, Route};
use crate::features::session::Session;
use crate::features::store::BillStore;
use crate::shared::errors::{AppError, AppResult};
use log::{info, log, warn};
use std::sync::Arc;

/// 一覧画面が提供する表示操作
pub trait BillsView: Send + Sync {
    /// 添付ファイルのプレビュー（モーダル）を表示する
    fn show_attachment_modal(&self, file_url: &str);
}

/// 請求書一覧のコントローラー
pub struct BillsController {
    session: Session,
    store: Arc<dyn BillStore>,
    navigator: Arc<dyn Navigator>,
    view: Arc<dyn BillsView>,
}

impl BillsController {
    /// 新しいコントローラーを作成する
    ///
    /// # 引数
    /// * `session` - 現在のセッション（従業員である必要がある）
    /// * `store` - 請求書ストア
    /// * `navigator` - 画面遷移
    /// * `view` - 一覧画面
    ///
    /// # 戻り値
    /// コントローラー、従業員以外のセッションの場合はエラー
    pub fn new(
        session: Session,
        store: Arc<dyn BillStore>,
        navigator: Arc<dyn Navigator>,
        view: Arc<dyn BillsView>,
    ) -> AppResult<Self> {
        session.require_employee()?;

        Ok(Self {
            session,
            store,
            navigator,
            view,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 請求書を取得し、日付の降順に並べて返す
    ///
    /// ストアの失敗はそのまま返す（自動リトライは行わない）
    pub async fn load_bills(&self) -> AppResult<Vec<Bill>> {
        let bills = self.store.list().await?;
        info!(
            "請求書を取得しました: count={}, email={:?}",
            bills.len(),
            self.session.email()
        );
        Ok(sort_by_date_descending(bills))
    }

    /// 一覧画面の表示内容を組み立てる
    ///
    /// ストアの失敗はエラー画面として表示し、呼び出し側には返さない
    pub async fn load_page(&self) -> BillsPage {
        match self.load_bills().await {
            Ok(bills) => BillsPage::Loaded(bills.iter().map(BillRow::from).collect()),
            Err(e) => {
                log!(e.severity().log_level(), "請求書一覧の取得に失敗しました: {e}");
                BillsPage::Error(e.user_message().to_string())
            }
        }
    }

    /// 行の「目」アイコン: 添付ファイルのプレビューを開く
    pub fn handle_click_icon_eye(&self, row: &BillRow) -> AppResult<()> {
        match row.file_url.as_deref().filter(|url| !url.is_empty()) {
            Some(file_url) => {
                self.view.show_attachment_modal(file_url);
                Ok(())
            }
            None => {
                warn!("添付ファイルが無い請求書です: id={}", row.id);
                Err(AppError::not_found("添付ファイル"))
            }
        }
    }

    /// 「Nouvelle note de frais」ボタン: 作成フォームへ遷移する
    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }
}
