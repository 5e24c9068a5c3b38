//! # テスト用モック
//!
//! ディスパッチャーのテストで使用するインメモリのトランスポートとオブザーバー。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! afs-notifier-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use afs_notifier_domain::notification::{
    DeliveryError,
    DeliveryReceipt,
    DispatchId,
    NotificationPayload,
};
use async_trait::async_trait;
use lettre::Message;

use crate::notification::{DispatchObserver, MailTransport};

// ===== MockMailTransport =====

/// 送信メッセージを記録するトランスポート
///
/// `failing()` で作成すると、記録したうえで指定メッセージの
/// `DeliveryError::TransportFailure` を返す。
#[derive(Clone, Default)]
pub struct MockMailTransport {
    messages: Arc<Mutex<Vec<Message>>>,
    failure:  Option<String>,
}

impl MockMailTransport {
    /// 送信成功時に返す受領確認
    pub const ACKNOWLEDGEMENT: &'static str = "250 2.0.0 Ok: queued";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            failure:  Some(message.into()),
        }
    }

    /// トランスポートに渡されたメッセージ（失敗したものを含む）
    pub fn sent_messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn deliver(&self, message: Message) -> Result<String, DeliveryError> {
        self.messages.lock().unwrap().push(message);

        match &self.failure {
            Some(failure) => Err(DeliveryError::TransportFailure(failure.clone())),
            None => Ok(Self::ACKNOWLEDGEMENT.to_string()),
        }
    }
}

// ===== RecordingDispatchObserver =====

/// オブザーバーが受け取ったイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
    Attempted {
        dispatch_id: DispatchId,
        body:        String,
        bcc:         String,
    },
    Delivered(DeliveryReceipt),
    Failed {
        dispatch_id: DispatchId,
        error:       DeliveryError,
    },
}

/// 受け取ったイベントを順に記録するオブザーバー
#[derive(Clone, Default)]
pub struct RecordingDispatchObserver {
    events: Arc<Mutex<Vec<DispatchEvent>>>,
}

impl RecordingDispatchObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DispatchEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DispatchObserver for RecordingDispatchObserver {
    fn on_attempt(&self, dispatch_id: &DispatchId, payload: &NotificationPayload, bcc: &str) {
        self.events.lock().unwrap().push(DispatchEvent::Attempted {
            dispatch_id: dispatch_id.clone(),
            body:        payload.body().to_string(),
            bcc:         bcc.to_string(),
        });
    }

    fn on_delivered(&self, receipt: &DeliveryReceipt) {
        self.events
            .lock()
            .unwrap()
            .push(DispatchEvent::Delivered(receipt.clone()));
    }

    fn on_failed(&self, dispatch_id: &DispatchId, error: &DeliveryError) {
        self.events.lock().unwrap().push(DispatchEvent::Failed {
            dispatch_id: dispatch_id.clone(),
            error:       error.clone(),
        });
    }
}
