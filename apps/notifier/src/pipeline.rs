//! # 通知パイプライン
//!
//! 顧客入力の検証 → ペイロード導出 → 1 回の送信を順に実行する。
//! 検証に失敗した場合はペイロードを作らず、送信も試みない。

use std::sync::Arc;

use afs_notifier_domain::{
    customer::{CustomerInput, CustomerRecord},
    notification::{DeliveryError, DeliveryReceipt, NotificationPayload},
};
use afs_notifier_infra::notification::{MailDispatcher, NoopMailTransport};

use crate::{
    config::{NotificationBackend, NotifierConfig},
    error::AppError,
};

/// 設定の送信バックエンドに応じたディスパッチャーを作成する
pub fn build_dispatcher(config: &NotifierConfig) -> Result<MailDispatcher, DeliveryError> {
    match config.backend {
        NotificationBackend::Smtp => MailDispatcher::new(config.transport.clone()),
        NotificationBackend::Noop => Ok(MailDispatcher::with_transport(
            config.transport.clone(),
            Arc::new(NoopMailTransport),
        )),
    }
}

/// 顧客入力 1 件を検証して送信する
pub async fn run(
    input: CustomerInput,
    dispatcher: &MailDispatcher,
) -> Result<DeliveryReceipt, AppError> {
    let customer = CustomerRecord::try_from(input)?;
    let payload = NotificationPayload::from_customer(&customer);

    let receipt = dispatcher.send(&payload).await?;
    Ok(receipt)
}
