/// 請求書一覧機能モジュール
///
/// このモジュールは請求書（経費報告）の一覧に関する機能を提供します：
/// - 請求書データモデル
/// - 日付の降順での並び替え
/// - 一覧画面のコントローラーと描画
pub mod controller;
pub mod models;
pub mod ordering;
pub mod views;

// モデル
pub use models::{AttachmentPayload, Bill, BillRow, BillStatus, CreatedAttachment};

// 並び替え
pub use ordering::{anti_chrono, sort_by_date_descending};

// コントローラーとビュー
pub use controller::{BillsController, BillsView};
pub use views::{render_bills_page, BillsPage, ConsoleBillsView};
