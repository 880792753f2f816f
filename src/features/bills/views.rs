/// 請求書一覧画面の表示内容とテキスト描画
use super::controller::BillsView;
use super::models::BillRow;
use crate::features::routing::Route;

/// 一覧画面のタイトル
pub const BILLS_TITLE: &str = "Mes notes de frais";
/// 作成フォームへのボタンのラベル
pub const NEW_BILL_BUTTON: &str = "Nouvelle note de frais";

/// 一覧画面の状態
#[derive(Debug, Clone, PartialEq)]
pub enum BillsPage {
    /// 読み込み済みの行（新しい順）
    Loaded(Vec<BillRow>),
    /// ストアの失敗（メッセージをそのまま表示する）
    Error(String),
}

/// 一覧画面をテキストとして描画する
pub fn render_bills_page(page: &BillsPage) -> String {
    let icon = Route::Bills
        .active_icon()
        .map(|icon| icon.test_id())
        .unwrap_or_default();

    match page {
        BillsPage::Error(message) => format!("[{icon}] Erreur\n{message}"),
        BillsPage::Loaded(rows) => {
            let mut lines = vec![
                format!("[{icon}] {BILLS_TITLE}    [{NEW_BILL_BUTTON}]"),
                format!(
                    "{:<22} {:<24} {:<24} {:>10}  {}",
                    "Type", "Nom", "Date", "Montant", "Statut"
                ),
            ];
            lines.extend(rows.iter().map(render_row));
            lines.join("\n")
        }
    }
}

fn render_row(row: &BillRow) -> String {
    let date = format!("{} ({})", row.date, row.display_date);
    format!(
        "{:<22} {:<24} {:<24} {:>10}  {}",
        row.expense_type, row.name, date, row.amount, row.status
    )
}

/// 標準出力にプレビューURLを表示するビュー
#[derive(Debug, Default)]
pub struct ConsoleBillsView;

impl BillsView for ConsoleBillsView {
    fn show_attachment_modal(&self, file_url: &str) {
        println!("Justificatif: {file_url}");
    }
}
