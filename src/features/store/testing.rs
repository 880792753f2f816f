//! テスト用のストア
//!
//! 呼び出しを記録し、指定した操作を指定したエラーで失敗させる。

use super::{fixture_bills, BillStore};
use crate::features::bills::models::{AttachmentPayload, Bill, CreatedAttachment};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::Mutex;

/// ストアの操作
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    List,
    Create(AttachmentPayload),
    Update(Bill),
}

/// 失敗の種類
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// `Erreur {status}` で失敗する
    Status(u16),
}

impl Failure {
    fn to_error(self) -> AppError {
        match self {
            Failure::Status(status) => AppError::transport_status(status),
        }
    }
}

/// テスト用ストア
#[derive(Debug, Default)]
pub struct MockStore {
    pub list_failure: Option<Failure>,
    pub create_failure: Option<Failure>,
    pub update_failure: Option<Failure>,
    calls: Mutex<Vec<StoreCall>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_list(status: u16) -> Self {
        Self {
            list_failure: Some(Failure::Status(status)),
            ..Self::default()
        }
    }

    pub fn failing_create(status: u16) -> Self {
        Self {
            create_failure: Some(Failure::Status(status)),
            ..Self::default()
        }
    }

    pub fn failing_update(status: u16) -> Self {
        Self {
            update_failure: Some(Failure::Status(status)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BillStore for MockStore {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        self.record(StoreCall::List);
        match self.list_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(fixture_bills()),
        }
    }

    async fn create(&self, payload: &AttachmentPayload) -> AppResult<CreatedAttachment> {
        self.record(StoreCall::Create(payload.clone()));
        match self.create_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(CreatedAttachment {
                file_url: "https://localhost:3456/images/test.jpg".to_string(),
                key: "1234".to_string(),
            }),
        }
    }

    async fn update(&self, bill: &Bill) -> AppResult<Bill> {
        self.record(StoreCall::Update(bill.clone()));
        match self.update_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(bill.clone()),
        }
    }
}
