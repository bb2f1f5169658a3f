use crate::cli::Commands;
use crate::config::{INSECURE_SKIP_VERIFY, REQUEST_TIMEOUT_SECONDS};
use crate::metrics::encode_text;
use crate::{FetcherConfig, MetricKind, MetricsFetcher, PromSourceError, Result};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Query {
            address,
            node,
            period,
            insecure_skip_verify,
            timeout,
            stats,
        } => {
            let config = build_config(address, insecure_skip_verify, timeout);
            handle_query(config, &node, &period, stats).await
        }
        Commands::Expr { node, period } => {
            for line in expressions(&node, &period) {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

fn build_config(address: String, insecure_skip_verify: bool, timeout: Option<u64>) -> FetcherConfig {
    let mut options = HashMap::new();
    options.insert(
        INSECURE_SKIP_VERIFY.to_string(),
        insecure_skip_verify.to_string(),
    );
    if let Some(secs) = timeout {
        options.insert(REQUEST_TIMEOUT_SECONDS.to_string(), secs.to_string());
    }
    FetcherConfig::new(address, options)
}

fn expressions(node: &str, period: &str) -> Vec<String> {
    MetricKind::ALL
        .iter()
        .map(|metric| metric.expr(period, node))
        .collect()
}

async fn handle_query(config: FetcherConfig, node: &str, period: &str, stats: bool) -> Result<()> {
    info!("Querying {} for node {} over {}", config.address(), node, period);

    let fetcher = MetricsFetcher::new(config)?;

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling queries");
            on_ctrl_c.cancel();
        }
    });

    let result = fetcher.node_metrics_avg(&cancel, node, period).await;
    signal_task.abort();
    let node_metrics = result?;

    let json = serde_json::to_string_pretty(&node_metrics)
        .map_err(|e| PromSourceError::Decode(e.to_string()))?;
    println!("{}", json);

    if stats {
        print!("{}", encode_text(fetcher.metrics())?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config() {
        let config = build_config("https://prom:9090".to_string(), true, Some(3));
        assert!(config.insecure_skip_verify());
        assert_eq!(
            config.request_timeout(),
            Some(std::time::Duration::from_secs(3))
        );

        let config = build_config("https://prom:9090".to_string(), false, None);
        assert!(!config.insecure_skip_verify());
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_expressions() {
        assert_eq!(
            expressions("worker-1", "10m"),
            vec![
                r#"cpu_usage_avg_10m{instance="worker-1"}"#.to_string(),
                r#"mem_usage_avg_10m{instance="worker-1"}"#.to_string(),
            ]
        );
    }
}
