//! MailDispatcher + SmtpMailTransport 統合テスト
//!
//! テスト内で最小限の SMTP サーバーを起動し、lettre の実トランスポート経由で
//! 送信する。外部の SMTP サーバーや Mailpit は不要。
//!
//! 実行方法:
//! ```bash
//! cargo test -p afs-notifier-infra --test smtp_dispatch_test
//! ```

use std::sync::Arc;

use afs_notifier_domain::{
    customer::CustomerRecord,
    notification::{DeliveryError, NotificationPayload},
};
use afs_notifier_infra::{
    mock::{DispatchEvent, RecordingDispatchObserver},
    notification::{MailDispatcher, TransportConfig},
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpListener,
};

const OBSERVER_BCC: &str = "store+afs@invite.example.com";

/// サーバーが受け取ったコマンドと DATA 本文
#[derive(Debug, Default)]
struct Transcript {
    commands: Vec<String>,
    data:     String,
}

/// 1 接続だけ受け付ける SMTP サーバー
///
/// STARTTLS は広告せず、AUTH PLAIN/LOGIN を受け入れる。
async fn serve_once(listener: TcpListener) -> Transcript {
    let (stream, _) = listener.accept().await.unwrap();
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut transcript = Transcript::default();

    write_half
        .write_all(b"220 fake.smtp ESMTP ready\r\n")
        .await
        .unwrap();

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await.unwrap() == 0 {
            break;
        }
        let command = line.trim_end().to_string();
        transcript.commands.push(command.clone());
        let upper = command.to_ascii_uppercase();

        let reply: &[u8] = if upper.starts_with("EHLO") {
            b"250-fake.smtp\r\n250 AUTH PLAIN LOGIN\r\n"
        } else if upper.starts_with("AUTH") {
            if command.split_whitespace().count() < 3 {
                // 初期レスポンスなし: クレデンシャル行を 1 行読み捨てる
                write_half.write_all(b"334 \r\n").await.unwrap();
                line.clear();
                reader.read_line(&mut line).await.unwrap();
            }
            b"235 2.7.0 Authentication successful\r\n"
        } else if upper.starts_with("MAIL") || upper.starts_with("RCPT") {
            b"250 2.1.0 Ok\r\n"
        } else if upper.starts_with("DATA") {
            write_half
                .write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n")
                .await
                .unwrap();
            loop {
                line.clear();
                if reader.read_line(&mut line).await.unwrap() == 0 || line == ".\r\n" {
                    break;
                }
                transcript.data.push_str(&line);
            }
            b"250 2.0.0 Ok: queued as FAKE1\r\n"
        } else if upper.starts_with("QUIT") {
            write_half.write_all(b"221 2.0.0 Bye\r\n").await.unwrap();
            break;
        } else {
            b"250 2.0.0 Ok\r\n"
        };
        write_half.write_all(reply).await.unwrap();
    }

    transcript
}

fn config(port: u16) -> TransportConfig {
    TransportConfig {
        host:           "127.0.0.1".to_string(),
        port,
        username:       "apikey".to_string(),
        password:       "s3cr3t".to_string(),
        sender_name:    "My Store".to_string(),
        sender_address: "noreply@store.example.com".to_string(),
        observer_bcc:   OBSERVER_BCC.to_string(),
    }
}

fn payload() -> NotificationPayload {
    let customer = CustomerRecord::new("Jane Doe", "jane@example.com", "A123").unwrap();
    NotificationPayload::from_customer(&customer)
}

#[tokio::test]
async fn test_smtpサーバーへ送信しbccがエンベロープ宛先に含まれる() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(serve_once(listener));

    let observer = RecordingDispatchObserver::new();
    let sut = MailDispatcher::new(config(port))
        .unwrap()
        .with_observer(Arc::new(observer.clone()));

    let receipt = sut.send(&payload()).await.unwrap();
    let transcript = server.await.unwrap();

    assert!(receipt.response.starts_with("250"), "{}", receipt.response);
    assert!(
        receipt.response.ends_with("Ok: queued as FAKE1"),
        "{}",
        receipt.response
    );

    let has_command = |prefix: &str| transcript.commands.iter().any(|c| c.starts_with(prefix));
    assert!(has_command("AUTH"), "{:?}", transcript.commands);
    assert!(
        has_command("MAIL FROM:<noreply@store.example.com>"),
        "{:?}",
        transcript.commands
    );
    assert!(
        has_command("RCPT TO:<jane@example.com>"),
        "{:?}",
        transcript.commands
    );
    assert!(
        has_command(&format!("RCPT TO:<{OBSERVER_BCC}>")),
        "{:?}",
        transcript.commands
    );

    assert!(transcript.data.contains("Subject: Your Purchase Experience - ORDER#A123"));
    assert!(transcript.data.contains("Email: jane@example.com"));
    assert!(transcript.data.contains("Name: Jane Doe"));
    assert!(transcript.data.contains("Reference: A123"));

    assert!(matches!(
        observer.events().last(),
        Some(DispatchEvent::Delivered(_))
    ));
}

#[tokio::test]
async fn test_接続できない場合はトランスポート失敗を返し成功イベントは出ない() {
    // 一度バインドして解放したポートは接続拒否される
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let observer = RecordingDispatchObserver::new();
    let sut = MailDispatcher::new(config(port))
        .unwrap()
        .with_observer(Arc::new(observer.clone()));

    let result = sut.send(&payload()).await;

    let message = match result {
        Err(DeliveryError::TransportFailure(message)) => message,
        other => panic!("TransportFailure であること: {other:?}"),
    };
    assert!(!message.is_empty());

    let events = observer.events();
    assert!(matches!(events.first(), Some(DispatchEvent::Attempted { .. })));
    assert!(matches!(
        events.last(),
        Some(DispatchEvent::Failed { error: DeliveryError::TransportFailure(m), .. })
            if m == &message
    ));
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, DispatchEvent::Delivered(_)))
    );
}
