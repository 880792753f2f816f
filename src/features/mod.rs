/// 機能別モジュール
///
/// 各機能モジュールは、その機能に関連するコード（モデル、コントローラー、表示）を
/// 含む自己完結型のユニットです。
pub mod bills;
pub mod new_bill;
pub mod routing;
pub mod session;
pub mod store;
