//! Logging setup utilities for the tcpchat binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the given library crates and the binary itself. The log
/// level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "tcpchat-server")
/// * `crate_names` - Library crates whose events should pass the filter
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use tcpchat_shared::logger::setup_logger;
///
/// setup_logger("tcpchat-server", &["tcpchat_server"], "info");
/// ```
pub fn setup_logger(binary_name: &str, crate_names: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, crate_names, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the `EnvFilter` directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, crate_names: &[&str], default_log_level: &str) -> String {
    std::iter::once(binary_name)
        .chain(crate_names.iter().copied())
        .chain(std::iter::once(env!("CARGO_PKG_NAME")))
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_binary_and_crates() {
        // テスト項目: バイナリ名とライブラリ crate 名がすべてフィルタに含まれる
        // given (前提条件):
        let binary_name = "tcpchat-server";

        // when (操作):
        let filter = default_filter(binary_name, &["tcpchat_server"], "debug");

        // then (期待する結果):
        assert_eq!(
            filter,
            "tcpchat_server=debug,tcpchat_server=debug,tcpchat_shared=debug"
        );
    }

    #[test]
    fn test_default_filter_replaces_hyphens() {
        // テスト項目: ハイフンを含むターゲット名はアンダースコアに置換される
        // given (前提条件):

        // when (操作):
        let filter = default_filter("tcpchat-client", &[], "info");

        // then (期待する結果):
        assert!(filter.starts_with("tcpchat_client=info"));
        assert!(!filter.contains('-'));
    }
}
