use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// ユーザー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    /// 従業員（請求書の一覧・作成が可能）
    Employee,
    /// 管理者（ダッシュボードのみ）
    Admin,
}

/// 永続ストレージの `user` キーに保存される現在のユーザー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CurrentUser {
    /// 従業員ユーザーを作成する
    pub fn employee<S: Into<String>>(email: S) -> Self {
        Self {
            user_type: UserType::Employee,
            email: Some(email.into()),
        }
    }
}

/// コントローラーに明示的に渡されるセッション
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: CurrentUser,
}

impl Session {
    pub fn new(user: CurrentUser) -> Self {
        Self { user }
    }

    /// 従業員セッションを作成する（テスト・開発用のショートカット）
    pub fn employee<S: Into<String>>(email: S) -> Self {
        Self::new(CurrentUser::employee(email))
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn user_type(&self) -> UserType {
        self.user.user_type
    }

    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }

    /// 従業員セッションであることを確認する
    ///
    /// # 戻り値
    /// 従業員の場合はOk(())、それ以外はセッションエラー
    pub fn require_employee(&self) -> AppResult<()> {
        match self.user.user_type {
            UserType::Employee => Ok(()),
            other => Err(AppError::session(format!(
                "従業員以外のユーザーは請求書画面を利用できません: {other:?}"
            ))),
        }
    }

    /// 請求書作成に必要なメールアドレスを取得する
    pub fn require_email(&self) -> AppResult<&str> {
        self.email()
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| AppError::session("セッションにメールアドレスがありません"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_deserialization() {
        // 追加のフィールド（password, status）は無視される
        let json = r#"{"type":"Employee","email":"a@a","password":"azerty","status":"connected"}"#;
        let user: CurrentUser = serde_json::from_str(json).unwrap();

        assert_eq!(user.user_type, UserType::Employee);
        assert_eq!(user.email.as_deref(), Some("a@a"));
    }

    #[test]
    fn test_current_user_without_email() {
        let user: CurrentUser = serde_json::from_str(r#"{"type":"Employee"}"#).unwrap();
        assert_eq!(user.email, None);

        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"type":"Employee"}"#);
    }

    #[test]
    fn test_require_employee() {
        assert!(Session::employee("e@e").require_employee().is_ok());

        let admin = Session::new(CurrentUser {
            user_type: UserType::Admin,
            email: Some("admin@test.tld".to_string()),
        });
        assert!(matches!(
            admin.require_employee(),
            Err(AppError::Session(_))
        ));
    }

    #[test]
    fn test_require_email() {
        assert_eq!(Session::employee("a@a").require_email().unwrap(), "a@a");

        let no_email = Session::new(CurrentUser {
            user_type: UserType::Employee,
            email: None,
        });
        assert!(no_email.require_email().is_err());

        assert!(Session::employee("  ").require_email().is_err());
    }
}
