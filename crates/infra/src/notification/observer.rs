//! 送信診断のオブザーバー
//!
//! 送信試行・成功・失敗の 3 イベントを受け取る最小限の抽象。
//! 本番では構造化ログに出力し、テストではイベントを記録して検証する。

use afs_notifier_domain::notification::{
    DeliveryError,
    DeliveryReceipt,
    DispatchId,
    NotificationPayload,
};
use afs_notifier_shared::{event_log::event, log_business_event};

/// 送信診断オブザーバー
///
/// 各メソッドは `MailDispatcher::send` の中から同期的に呼ばれる。
pub trait DispatchObserver: Send + Sync {
    /// ネットワーク送信の直前に呼ばれる（本文と BCC アドレスを含む）
    fn on_attempt(&self, dispatch_id: &DispatchId, payload: &NotificationPayload, bcc: &str);

    /// 送信成功時に呼ばれる
    fn on_delivered(&self, receipt: &DeliveryReceipt);

    /// 送信失敗時に呼ばれる
    fn on_failed(&self, dispatch_id: &DispatchId, error: &DeliveryError);
}

/// tracing によるビジネスイベントログ出力
#[derive(Debug, Clone, Default)]
pub struct TracingDispatchObserver;

impl DispatchObserver for TracingDispatchObserver {
    fn on_attempt(&self, dispatch_id: &DispatchId, payload: &NotificationPayload, bcc: &str) {
        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_ATTEMPTED,
            event.entity_type = event::entity_type::PURCHASE_NOTIFICATION,
            event.entity_id = %dispatch_id,
            event.result = event::result::PENDING,
            notification.recipient = %payload.recipient_header(),
            notification.subject = %payload.subject(),
            notification.body = %payload.body(),
            notification.bcc = %bcc,
            "AFS 向け通知メールを送信します"
        );
    }

    fn on_delivered(&self, receipt: &DeliveryReceipt) {
        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_SENT,
            event.entity_type = event::entity_type::PURCHASE_NOTIFICATION,
            event.entity_id = %receipt.dispatch_id,
            event.result = event::result::SUCCESS,
            notification.response = %receipt.response,
            "通知メール送信成功"
        );
    }

    fn on_failed(&self, dispatch_id: &DispatchId, error: &DeliveryError) {
        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_FAILED,
            event.entity_type = event::entity_type::PURCHASE_NOTIFICATION,
            event.entity_id = %dispatch_id,
            event.result = event::result::FAILURE,
            error = %error,
            "通知メール送信失敗"
        );
    }
}
