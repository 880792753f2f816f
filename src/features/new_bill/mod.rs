/// 請求書作成機能モジュール
///
/// このモジュールは請求書（経費報告）の作成に関する機能を提供します：
/// - 添付ファイル（領収書画像）の検証
/// - 作成フォームの入力値と状態
/// - 作成フォームのコントローラー
pub mod attachment;
pub mod controller;
pub mod models;

pub use attachment::{
    is_accepted_image_type, validate_selected_file, SelectedFile, ACCEPTED_IMAGE_TYPES,
    INVALID_FILE_TYPE_MESSAGE, MISSING_FILE_NAME_MESSAGE,
};
pub use controller::{Alerter, NewBillController, NewBillView};
pub use models::{NewBillForm, NewBillState, DEFAULT_PCT};
