//! 通知パイプライン統合テスト
//!
//! モックのトランスポートとオブザーバーで、検証 → 導出 → 送信の流れを確認する。
//!
//! 実行方法:
//! ```bash
//! cargo test -p afs-notifier --test pipeline_test
//! ```

use std::{path::PathBuf, sync::Arc};

use afs_notifier::{
    config::{NotificationBackend, NotifierConfig},
    error::AppError,
    pipeline::{build_dispatcher, run},
};
use afs_notifier_domain::{ValidationError, customer::CustomerInput, notification::DeliveryError};
use afs_notifier_infra::{
    mock::{DispatchEvent, MockMailTransport, RecordingDispatchObserver},
    notification::{MailDispatcher, TransportConfig},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const OBSERVER_BCC: &str = "store+afs@invite.example.com";

fn transport_config() -> TransportConfig {
    TransportConfig {
        host:           "localhost".to_string(),
        port:           1025,
        username:       "user".to_string(),
        password:       "password".to_string(),
        sender_name:    "My Store".to_string(),
        sender_address: "noreply@store.example.com".to_string(),
        observer_bcc:   OBSERVER_BCC.to_string(),
    }
}

fn input(name: Option<&str>, email: Option<&str>, order_id: Option<&str>) -> CustomerInput {
    CustomerInput {
        name:     name.map(str::to_string),
        email:    email.map(str::to_string),
        order_id: order_id.map(str::to_string),
    }
}

fn make_dispatcher(
    transport: &MockMailTransport,
    observer: &RecordingDispatchObserver,
) -> MailDispatcher {
    MailDispatcher::with_transport(transport_config(), Arc::new(transport.clone()))
        .with_observer(Arc::new(observer.clone()))
}

#[tokio::test]
async fn test_有効な顧客入力は1回だけ送信される() {
    let transport = MockMailTransport::new();
    let observer = RecordingDispatchObserver::new();
    let dispatcher = make_dispatcher(&transport, &observer);

    let receipt = run(
        input(Some("Jane Doe"), Some("jane@example.com"), Some("A123")),
        &dispatcher,
    )
    .await
    .unwrap();

    assert_eq!(receipt.response, MockMailTransport::ACKNOWLEDGEMENT);
    assert_eq!(transport.sent_messages().len(), 1);
    assert_eq!(
        observer.events()[0],
        DispatchEvent::Attempted {
            dispatch_id: receipt.dispatch_id.clone(),
            body:        "Email: jane@example.com\nName: Jane Doe\nReference: A123".to_string(),
            bcc:         OBSERVER_BCC.to_string(),
        }
    );
}

#[rstest]
#[case("Doe, Jane", "jane@example.com", "A123")]
#[case("山田 花子", "hanako@example.jp", "注文-0001")]
#[case("  Jane (VIP) Doe ", "jane.doe+afs@example.co.uk", " 42 ")]
#[tokio::test]
async fn test_入力内容によらず本文がそのまま渡りbccが付与される(
    #[case] name: &str,
    #[case] email: &str,
    #[case] order_id: &str,
) {
    let transport = MockMailTransport::new();
    let observer = RecordingDispatchObserver::new();
    let dispatcher = make_dispatcher(&transport, &observer);

    let receipt = run(input(Some(name), Some(email), Some(order_id)), &dispatcher)
        .await
        .unwrap();

    let recipients: Vec<String> = transport.sent_messages()[0]
        .envelope()
        .to()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(recipients, vec![email.to_string(), OBSERVER_BCC.to_string()]);
    assert_eq!(
        observer.events()[0],
        DispatchEvent::Attempted {
            dispatch_id: receipt.dispatch_id,
            body:        format!("Email: {email}\nName: {name}\nReference: {order_id}"),
            bcc:         OBSERVER_BCC.to_string(),
        }
    );
}

#[rstest]
#[case(input(Some(""), Some("jane@example.com"), Some("A123")), "name")]
#[case(input(Some("Jane Doe"), None, Some("A123")), "email")]
#[case(input(Some("Jane Doe"), Some("jane@example.com"), None), "orderId")]
#[tokio::test]
async fn test_検証に失敗すると送信を試みない(
    #[case] customer: CustomerInput,
    #[case] expected_field: &'static str,
) {
    let transport = MockMailTransport::new();
    let observer = RecordingDispatchObserver::new();
    let dispatcher = make_dispatcher(&transport, &observer);

    let result = run(customer, &dispatcher).await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::MissingRequiredField { field }))
            if field == expected_field
    ));
    assert!(transport.sent_messages().is_empty());
    assert!(observer.events().is_empty());
}

#[tokio::test]
async fn test_送信失敗は配送エラーとしてそのまま返る() {
    let transport = MockMailTransport::failing("421 4.7.0 Try again later");
    let observer = RecordingDispatchObserver::new();
    let dispatcher = make_dispatcher(&transport, &observer);

    let result = run(
        input(Some("Jane Doe"), Some("jane@example.com"), Some("A123")),
        &dispatcher,
    )
    .await;

    assert!(matches!(
        result,
        Err(AppError::Delivery(DeliveryError::TransportFailure(message)))
            if message == "421 4.7.0 Try again later"
    ));
    assert_eq!(transport.sent_messages().len(), 1);
}

#[tokio::test]
async fn test_noopバックエンドは送信せずに成功する() {
    let config = NotifierConfig {
        transport:     transport_config(),
        backend:       NotificationBackend::Noop,
        customer_file: PathBuf::from("customer.json"),
    };
    let dispatcher = build_dispatcher(&config).unwrap();

    let receipt = run(
        input(Some("Jane Doe"), Some("jane@example.com"), Some("A123")),
        &dispatcher,
    )
    .await
    .unwrap();

    assert_eq!(receipt.response, "noop");
}
