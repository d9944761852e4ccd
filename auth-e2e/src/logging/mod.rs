// src/logging/mod.rs

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// デフォルトのログフィルタ
pub const DEFAULT_FILTER: &str = "auth_e2e=info";

#[macro_export]
macro_rules! log_with_context {
    ($level:expr, $msg:expr $(, $($key:literal => $value:expr),* $(,)?)?) => {
        match $level {
            tracing::Level::ERROR => {
                tracing::error!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            tracing::Level::WARN => {
                tracing::warn!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            tracing::Level::INFO => {
                tracing::info!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            tracing::Level::DEBUG => {
                tracing::debug!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            _ => {}
        }
    };
}

/// スイート実行用のトレーシングを初期化
///
/// `RUST_LOG` が設定されていればそちらを優先します。
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(fmt::layer())
        .try_init();
}

/// ステータスコードに応じたログレベル
///
/// 5xx のみ warn、それ以外は debug。
pub fn level_for_status(status: u16) -> tracing::Level {
    if status >= 500 {
        tracing::Level::WARN
    } else {
        tracing::Level::DEBUG
    }
}
