//! # ログ出力の初期化
//!
//! ジョブ 1 回分のログを stderr に出力する。
//! 出力形式は `LOG_FORMAT`、レベルは `RUST_LOG` で切り替える。
//!
//! stdout には何も書かないため、ジョブ実行基盤がログと
//! 標準出力を取り違えることはない。

/// ログ形式を指定する環境変数
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,afs_notifier=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 イベント 1 行の JSON（ログ収集向け）
    Json,
    /// 手動実行向け
    #[default]
    Pretty,
}

impl LogFormat {
    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から読み取る
    ///
    /// 未設定・不明な値はいずれも [`Pretty`](LogFormat::Pretty) になる。
    /// 不明な値はトレーシング初期化前なので stderr に直接警告する。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(LOG_FORMAT_VAR).as_deref() {
            None => Self::default(),
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            Some(other) => {
                eprintln!("WARNING: unknown {LOG_FORMAT_VAR}={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }
}

/// トレーシングを初期化する
///
/// JSON 形式ではイベントフィールドをトップレベルに展開し、
/// 現在のスパン（`dispatch` など）を `span` キーに含める。
#[cfg(feature = "observability")]
pub fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
