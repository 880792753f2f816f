//! 請求書の並び替え
//!
//! 日付はゼロ埋めされたISO形式なので、文字列の比較がそのまま日付の比較になる。
//! 形式が崩れた日付や空の日付も文字列として比較され、空の日付は末尾に並ぶ。

use super::models::Bill;
use std::cmp::Ordering;

/// 新しい日付を先にする比較関数
pub fn anti_chrono(a: &str, b: &str) -> Ordering {
    b.cmp(a)
}

/// 請求書を日付の降順（新しい順）に並び替える
///
/// 安定ソートのため、同じ日付の請求書は入力の順序を保つ。
pub fn sort_by_date_descending(mut bills: Vec<Bill>) -> Vec<Bill> {
    bills.sort_by(|a, b| anti_chrono(&a.date, &b.date));
    bills
}
