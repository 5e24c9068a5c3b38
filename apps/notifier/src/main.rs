//! # AFS Notifier
//!
//! 購入者 1 名に購入体験メールを 1 通送信し、終了するジョブ。
//!
//! ## 役割
//!
//! - **顧客レコードの検証**: 氏名・メールアドレス・注文 ID が揃っていることを確認
//! - **メール生成**: AFS がパースできる固定フォーマットの本文を生成
//! - **送信**: SMTP で 1 回だけ送信し、AFS のアドレスを BCC に付与
//!
//! ```text
//! customer.json ──→ CustomerRecord ──→ NotificationPayload ──→ MailDispatcher
//!                                                                  │ To: 購入者
//!                                                                  │ Bcc: AFS
//!                                                                  ↓
//!                                                             SMTP サーバー
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SMTP_HOST` | **Yes** | SMTP サーバーのホスト名 |
//! | `SMTP_PORT` | **Yes** | SMTP サーバーのポート番号 |
//! | `SMTP_USER` | **Yes** | SMTP 認証ユーザー名 |
//! | `SMTP_PASSWORD` | **Yes** | SMTP 認証パスワード |
//! | `SENDER_NAME` | **Yes** | From の表示名 |
//! | `SENDER_EMAIL` | **Yes** | From のアドレス |
//! | `TRUSTPILOT_AFS_EMAIL` | **Yes** | AFS の BCC アドレス |
//! | `NOTIFICATION_BACKEND` | No | `smtp`（デフォルト）または `noop` |
//! | `CUSTOMER_FILE` | No | 顧客 JSON のパス（デフォルト: `customer.json`） |
//! | `LOG_FORMAT` | No | `pretty`（デフォルト）または `json` |
//!
//! ## 起動方法
//!
//! ```bash
//! # 送信せずに内容だけ確認する
//! NOTIFICATION_BACKEND=noop cargo run -p afs-notifier
//!
//! # 送信する
//! CUSTOMER_FILE=./customer.json cargo run -p afs-notifier --release
//! ```

use afs_notifier::{
    config::NotifierConfig,
    customer_source::load_customer,
    error::AppError,
    pipeline::{build_dispatcher, run},
};
use afs_notifier_domain::notification::DeliveryReceipt;
use afs_notifier_shared::observability::{LogFormat, init_tracing};
use tracing::Instrument;

const SERVICE_NAME: &str = "afs-notifier";

/// AFS Notifier のエントリーポイント
///
/// どの段階で失敗してもエラーを記録し、失敗ステータスで終了する。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env());

    let span = tracing::info_span!("app", service = SERVICE_NAME);

    match notify().instrument(span).await {
        Ok(receipt) => {
            tracing::info!(
                dispatch_id = %receipt.dispatch_id,
                response = %receipt.response,
                "通知処理が完了しました"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                error.category = e.category(),
                error.kind = e.kind(),
                error = %e,
                "通知処理に失敗しました"
            );
            Err(e.into())
        }
    }
}

async fn notify() -> Result<DeliveryReceipt, AppError> {
    let config = NotifierConfig::from_env()?;

    tracing::info!(
        backend = %config.backend,
        customer_file = %config.customer_file.display(),
        "通知処理を開始します"
    );

    let input = load_customer(&config.customer_file).await?;
    let dispatcher = build_dispatcher(&config)?;

    run(input, &dispatcher).await
}
