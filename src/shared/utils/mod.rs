/// ID生成
pub mod nanoid;

use crate::shared::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// ストアに保存される日付の形式（YYYY-MM-DD、区切り文字は `- /.` を許容）
static BILL_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(19|20)\d\d[- /.](0[1-9]|1[012])[- /.](0[1-9]|[12][0-9]|3[01])$")
        .expect("日付パターンの正規表現が不正です")
});

/// 表示用の月名（フランス語の短縮形、先頭3文字）
const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// 日付文字列が請求書の日付パターンに一致するかを判定
pub fn is_bill_date(date_str: &str) -> bool {
    BILL_DATE_PATTERN.is_match(date_str)
}

/// 日付文字列のバリデーション
///
/// # 引数
/// * `date_str` - 日付文字列（YYYY-MM-DD形式）
///
/// # 戻り値
/// 有効な日付の場合はOk(())、無効な場合はエラー
///
/// # バリデーション規則
/// - 請求書の日付パターンに一致すること
/// - 実在する日付であること（2023-02-29 などは不可）
pub fn validate_date(date_str: &str) -> AppResult<()> {
    if !is_bill_date(date_str) {
        return Err(AppError::validation(
            "日付はYYYY-MM-DD形式で入力してください",
        ));
    }

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::validation("無効な日付です"))?;

    Ok(())
}

/// 金額のバリデーション
///
/// # バリデーション規則
/// - 有限の正の数値であること
/// - 小数点以下は2桁まで
pub fn validate_amount(amount: f64) -> AppResult<()> {
    if !amount.is_finite() {
        return Err(AppError::validation("無効な金額です"));
    }

    if amount <= 0.0 {
        return Err(AppError::validation("金額は正の数値で入力してください"));
    }

    let amount_str = format!("{amount:.10}");
    if let Some(decimal_pos) = amount_str.find('.') {
        let significant_decimals = amount_str[decimal_pos + 1..].trim_end_matches('0');
        if significant_decimals.len() > 2 {
            return Err(AppError::validation(
                "金額は小数点以下2桁まで入力してください",
            ));
        }
    }

    Ok(())
}

/// 必須フィールドのバリデーション
pub fn validate_required_field(text: &str, field_name: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::validation(format!("{field_name}は必須項目です")));
    }
    Ok(())
}

/// 日付を一覧表示用にフォーマットする
///
/// # 引数
/// * `date_str` - 日付文字列（YYYY-MM-DD形式）
///
/// # 戻り値
/// `4 Avr. 04` 形式の文字列、解析できない場合はエラー
pub fn format_date(date_str: &str) -> AppResult<String> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("日付の形式が正しくありません: {date_str}")))?;

    let month = MONTHS_FR[date.month0() as usize];
    let year = date.year().rem_euclid(100);

    Ok(format!("{} {month}. {year:02}", date.day()))
}

/// 金額を表示用にフォーマットする
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0} €")
    } else {
        format!("{amount:.2} €")
    }
}

/// 文字列の正規化（前後の空白を削除）
pub fn normalize_string(text: &str) -> String {
    text.trim().to_string()
}
