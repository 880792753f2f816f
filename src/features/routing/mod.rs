/// ルーティング機能モジュール
///
/// 画面の識別子（ルート）、画面遷移のインターフェース、
/// 縦型レイアウトで強調表示するアイコンを定義します。
use std::sync::Mutex;

/// 画面のルート
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// ログイン画面
    Login,
    /// 請求書一覧
    Bills,
    /// 請求書作成フォーム
    NewBill,
    /// 管理者ダッシュボード
    Dashboard,
}

/// 縦型レイアウトのアイコン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutIcon {
    /// 請求書一覧のアイコン
    Window,
    /// 請求書作成のアイコン
    Mail,
}

impl LayoutIcon {
    /// ビュー側のテストID
    pub fn test_id(&self) -> &'static str {
        match self {
            LayoutIcon::Window => "icon-window",
            LayoutIcon::Mail => "icon-mail",
        }
    }
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Login, Route::Bills, Route::NewBill, Route::Dashboard];

    /// ルートのパス
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
            Route::Dashboard => "#admin/dashboard",
        }
    }

    /// パスからルートを解決する
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// このルートで強調表示するアイコン（`active-icon`）
    pub fn active_icon(&self) -> Option<LayoutIcon> {
        match self {
            Route::Bills => Some(LayoutIcon::Window),
            Route::NewBill => Some(LayoutIcon::Mail),
            Route::Login | Route::Dashboard => None,
        }
    }
}

/// 画面遷移のインターフェース
pub trait Navigator: Send + Sync {
    /// 指定したルートの画面に切り替える
    fn navigate(&self, route: Route);
}

/// 遷移履歴を保持するナビゲーター
#[derive(Debug)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new(initial: Route) -> Self {
        Self {
            history: Mutex::new(vec![initial]),
        }
    }

    /// 現在表示中のルート
    pub fn current(&self) -> Route {
        self.history().last().copied().unwrap_or(Route::Login)
    }

    /// これまでの遷移履歴（初期ルートを含む）
    pub fn history(&self) -> Vec<Route> {
        match self.history.lock() {
            Ok(history) => history.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        log::debug!("画面遷移: {}", route.path());
        match self.history.lock() {
            Ok(mut history) => history.push(route),
            Err(poisoned) => poisoned.into_inner().push(route),
        }
    }
}
