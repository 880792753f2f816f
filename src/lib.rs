// 機能モジュール構造
pub mod features;
pub mod shared;

use features::bills::{render_bills_page, BillsController, ConsoleBillsView};
use features::routing::{HistoryNavigator, Route};
use features::session::SessionStorage;
use features::store::{BillStore, HttpBillStore, InMemoryBillStore};
use log::{info, warn};
use shared::api_client::ApiClient;
use shared::config::{
    initialize_application, initialize_logging_system, load_environment_variables,
    log_initialization_complete, ApiConfig, EnvironmentConfig,
};
use shared::errors::AppResult;
use std::sync::Arc;

/// 環境変数 `BILL_STORE` の値から請求書ストアを作成する
///
/// `memory` の場合はプロセス内のストア、それ以外はAPIサーバー
fn create_store() -> AppResult<Arc<dyn BillStore>> {
    let kind = crate::get_env_var_or_default!("BILL_STORE", "http");

    if kind.eq_ignore_ascii_case("memory") {
        info!("プロセス内の請求書ストアを使用します");
        return Ok(Arc::new(InMemoryBillStore::with_fixtures()));
    }

    let config = ApiConfig::from_env()?;
    info!("APIサーバーの請求書ストアを使用します: {}", config.base_url);
    if EnvironmentConfig::from_env().is_production() && config.is_localhost() {
        warn!("プロダクション環境でlocalhostのAPIサーバーを使用しています");
    }

    let mut store = HttpBillStore::new(ApiClient::new(config)?);
    if let Some(token) = crate::get_env_var_optional!("API_AUTH_TOKEN") {
        store = store.with_auth_token(token);
    }
    Ok(Arc::new(store))
}

/// 保存されたセッションで請求書一覧を表示する
pub async fn run() -> AppResult<()> {
    // 環境に応じた.envファイルを読み込み（ログシステム初期化前に実行）
    load_environment_variables();
    initialize_logging_system();

    let init = initialize_application()?;
    log_initialization_complete(&init);

    let session = SessionStorage::open(&init.session_path)?.load_session()?;
    let store = create_store()?;
    let navigator = Arc::new(HistoryNavigator::new(Route::Bills));

    let controller = BillsController::new(
        session,
        store,
        navigator,
        Arc::new(ConsoleBillsView),
    )?;

    let page = controller.load_page().await;
    println!("{}", render_bills_page(&page));

    Ok(())
}
