//! メールディスパッチャー
//!
//! ペイロードから送信メッセージを組み立て、送信者情報と AFS の BCC を付与して
//! トランスポートへ 1 回だけ渡す。
//!
//! 1 回の `send` は `Idle → Sending → {Delivered | Failed}` と遷移して終端する。
//! 呼び出し間で保持する状態はないため、同じインスタンスを続けて使ってよい。

use std::sync::Arc;

use afs_notifier_domain::notification::{
    DeliveryError,
    DeliveryReceipt,
    DispatchId,
    NotificationPayload,
};
use chrono::{DateTime, Utc};
use lettre::{
    Address,
    Message,
    message::{Mailbox, header::ContentType},
};

use super::{
    DispatchObserver,
    MailTransport,
    SmtpMailTransport,
    TracingDispatchObserver,
    TransportConfig,
};

/// 送信完了時刻の取得元
type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// メールディスパッチャー
pub struct MailDispatcher {
    config:    TransportConfig,
    transport: Arc<dyn MailTransport>,
    observer:  Arc<dyn DispatchObserver>,
    clock:     Clock,
}

impl MailDispatcher {
    /// SMTP トランスポートでディスパッチャーを作成する
    ///
    /// 接続は最初の `send` まで遅延される。
    pub fn new(config: TransportConfig) -> Result<Self, DeliveryError> {
        let transport = SmtpMailTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// 任意のトランスポートでディスパッチャーを作成する
    ///
    /// 診断は tracing に出力し、送信時刻はシステム時刻を使う。
    pub fn with_transport(config: TransportConfig, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            config,
            transport,
            observer: Arc::new(TracingDispatchObserver),
            clock: Box::new(Utc::now),
        }
    }

    /// 診断オブザーバーを差し替える
    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// 送信完了時刻の取得元を差し替える
    pub fn with_clock(
        mut self,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// ペイロードを送信する
    ///
    /// 送信は 1 回のみで、失敗しても再試行しない。
    /// BCC には設定された AFS アドレスを毎回必ず付与する。
    pub async fn send(
        &self,
        payload: &NotificationPayload,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let dispatch_id = DispatchId::new();
        self.observer
            .on_attempt(&dispatch_id, payload, &self.config.observer_bcc);

        let result = match self.build_message(payload) {
            Ok(message) => self.transport.deliver(message).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => {
                let receipt = DeliveryReceipt {
                    dispatch_id,
                    response,
                    sent_at: (self.clock)(),
                };
                self.observer.on_delivered(&receipt);
                Ok(receipt)
            }
            Err(e) => {
                self.observer.on_failed(&dispatch_id, &e);
                Err(e)
            }
        }
    }

    fn build_message(&self, payload: &NotificationPayload) -> Result<Message, DeliveryError> {
        let sender_address: Address = self.config.sender_address.parse().map_err(|e| {
            DeliveryError::InvalidAddress(format!("送信元アドレス不正: {e}"))
        })?;
        let from = Mailbox::new(Some(self.config.sender_name.clone()), sender_address);

        let to = recipient_mailbox(payload.recipient_header())?;

        let bcc: Mailbox = self
            .config
            .observer_bcc
            .parse()
            .map_err(|e| DeliveryError::InvalidAddress(format!("BCC アドレス不正: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .bcc(bcc)
            .subject(payload.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(payload.body().to_string())
            .map_err(|e| DeliveryError::InvalidAddress(format!("メッセージ構築失敗: {e}")))
    }
}

/// 宛先ヘッダ（`Name <email>` 形式）をメールボックスに変換する
///
/// 表示名は任意の文字列を許すため、RFC 5322 として再パースせず
/// 最後の `" <"` で分割してアドレス部分だけを解釈する。
/// 表示名の引用符付けは lettre に任せる。
fn recipient_mailbox(header: &str) -> Result<Mailbox, DeliveryError> {
    let (name, rest) = header.rsplit_once(" <").ok_or_else(|| {
        DeliveryError::InvalidAddress(format!("宛先ヘッダ不正: {header}"))
    })?;
    let email = rest.strip_suffix('>').ok_or_else(|| {
        DeliveryError::InvalidAddress(format!("宛先ヘッダ不正: {header}"))
    })?;
    let address: Address = email
        .parse()
        .map_err(|e| DeliveryError::InvalidAddress(format!("宛先アドレス不正: {e}")))?;

    Ok(Mailbox::new(Some(name.to_string()), address))
}
