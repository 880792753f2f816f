use crate::features::bills::models::{Bill, BillStatus, CreatedAttachment};
use crate::shared::errors::AppResult;
use crate::shared::utils::{normalize_string, validate_amount, validate_date, validate_required_field};

/// TVAの割合（%）の既定値
pub const DEFAULT_PCT: u32 = 20;

/// 作成フォームの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewBillState {
    /// ファイル未選択
    #[default]
    Idle,
    /// 画像ファイルが選択済み
    FileSelected,
    /// 画像以外のファイルが選択された
    Rejected,
    /// ストアへ送信中
    Submitting,
    /// 作成完了（一覧へ遷移済み）
    Done,
    /// 送信失敗（再送信可能）
    SubmitFailed,
}

/// 作成フォームの入力値
#[derive(Debug, Clone, PartialEq)]
pub struct NewBillForm {
    /// 経費の種類（Transports, Restaurants et bars など）
    pub expense_type: String,
    pub name: String,
    /// YYYY-MM-DD形式の日付
    pub date: String,
    pub amount: f64,
    pub vat: Option<f64>,
    /// 未入力の場合は [`DEFAULT_PCT`]
    pub pct: Option<u32>,
    pub commentary: String,
}

impl NewBillForm {
    /// 入力値のバリデーション
    ///
    /// # バリデーション規則
    /// - 経費の種類が入力されていること
    /// - 日付が実在するYYYY-MM-DD形式であること
    /// - 金額が正の数値であること
    pub fn validate(&self) -> AppResult<()> {
        validate_required_field(&self.expense_type, "経費の種類")?;
        validate_date(&self.date)?;
        validate_amount(self.amount)?;
        Ok(())
    }

    /// 添付ファイル登録の結果から保留中の請求書を組み立てる
    ///
    /// # 引数
    /// * `created` - 添付ファイル登録の結果（キーが請求書のIDになる）
    /// * `email` - 提出者のメールアドレス
    /// * `file_name` - 添付ファイル名
    pub fn into_bill(self, created: CreatedAttachment, email: &str, file_name: &str) -> Bill {
        Bill {
            id: created.key,
            status: BillStatus::Pending,
            expense_type: normalize_string(&self.expense_type),
            name: normalize_string(&self.name),
            date: self.date,
            amount: self.amount,
            vat: self.vat,
            pct: Some(self.pct.unwrap_or(DEFAULT_PCT)),
            commentary: normalize_string(&self.commentary),
            comment_admin: None,
            email: email.to_string(),
            file_url: Some(created.file_url),
            file_name: Some(file_name.to_string()),
        }
    }
}
