use crate::shared::utils::{format_amount, format_date};
use serde::{Deserialize, Deserializer, Serialize};

/// 請求書のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// 一覧に表示するラベル
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refused",
        }
    }
}

/// 請求書（経費報告）データモデル
///
/// 作成途中のレコードは項目が `null` で返ることがあるため、
/// 必須でない項目はすべて `null` を既定値として読み込む
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BillStatus,
    /// 経費の種類（Transports, Restaurants et bars など）
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub expense_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// ISO形式の日付（YYYY-MM-DD）
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub vat: Option<f64>,
    #[serde(default)]
    pub pct: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commentary: String,
    #[serde(default)]
    pub comment_admin: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// `null` を型の既定値として読み込む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 数値または文字列で送られてくる任意の数値フィールドを読み込む
///
/// 空文字列・null は None として扱う
fn deserialize_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(value)) => Ok(Some(value)),
        Some(NumberOrString::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// 添付ファイルのアップロード用ペイロード（マルチパート: file + email）
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentPayload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    /// 提出者のメールアドレス
    pub email: String,
}

/// 添付ファイル登録の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAttachment {
    /// 添付ファイルのURL
    pub file_url: String,
    /// 請求書レコードのキー
    pub key: String,
}

/// 一覧の1行分の表示データ
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub id: String,
    pub expense_type: String,
    pub name: String,
    /// 並び替えに使うISO形式の日付
    pub date: String,
    /// 表示用の日付（フォーマットできない場合は元の文字列）
    pub display_date: String,
    pub amount: String,
    pub status: String,
    pub file_url: Option<String>,
}

impl From<&Bill> for BillRow {
    fn from(bill: &Bill) -> Self {
        let display_date = format_date(&bill.date).unwrap_or_else(|e| {
            log::warn!("日付をフォーマットできません: id={}, error={e}", bill.id);
            bill.date.clone()
        });

        Self {
            id: bill.id.clone(),
            expense_type: bill.expense_type.clone(),
            name: bill.name.clone(),
            date: bill.date.clone(),
            display_date,
            amount: format_amount(bill.amount),
            status: bill.status.label().to_string(),
            file_url: bill.file_url.clone(),
        }
    }
}
