use axum::http::StatusCode;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Default)]
pub(crate) struct RequestMetrics {
    counts: Mutex<HashMap<(String, u16), u64>>,
    latency_ns: Mutex<HashMap<String, Vec<u64>>>,
}

impl RequestMetrics {
    pub(crate) async fn observe_request(&self, route: &str, status: StatusCode, latency: Duration) {
        let mut counts = self.counts.lock().await;
        *counts
            .entry((route.to_string(), status.as_u16()))
            .or_insert(0) += 1;
        drop(counts);
        let mut latency_map = self.latency_ns.lock().await;
        latency_map
            .entry(route.to_string())
            .or_insert_with(Vec::new)
            .push(latency.as_nanos() as u64);
    }

    pub(crate) async fn counts_snapshot(&self) -> Vec<((String, u16), u64)> {
        let counts = self.counts.lock().await;
        let mut out: Vec<((String, u16), u64)> =
            counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
        out.sort();
        out
    }

    pub(crate) async fn latency_snapshot(&self) -> Vec<(String, Vec<u64>)> {
        let latency = self.latency_ns.lock().await;
        let mut out: Vec<(String, Vec<u64>)> =
            latency.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

pub(crate) fn percentile_ns(values: &[u64], pct: f64) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut v = values.to_vec();
    v.sort_unstable();
    let idx = ((v.len() as f64 - 1.0) * pct).round() as usize;
    v[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_of_empty_is_zero() {
        assert_eq!(percentile_ns(&[], 0.95), 0);
    }

    #[test]
    fn percentile_picks_rank_from_sorted_samples() {
        let samples = [50, 10, 40, 20, 30];
        assert_eq!(percentile_ns(&samples, 0.0), 10);
        assert_eq!(percentile_ns(&samples, 0.5), 30);
        assert_eq!(percentile_ns(&samples, 1.0), 50);
    }

    #[tokio::test]
    async fn observe_request_accumulates_by_route_and_status() {
        let metrics = RequestMetrics::default();
        metrics
            .observe_request("/v1/dashboard", StatusCode::OK, Duration::from_millis(1))
            .await;
        metrics
            .observe_request("/v1/dashboard", StatusCode::OK, Duration::from_millis(2))
            .await;
        metrics
            .observe_request("/v1/uploads", StatusCode::NOT_FOUND, Duration::from_millis(1))
            .await;
        let counts = metrics.counts_snapshot().await;
        assert_eq!(
            counts,
            vec![
                (("/v1/dashboard".to_string(), 200), 2),
                (("/v1/uploads".to_string(), 404), 1),
            ]
        );
        let latency = metrics.latency_snapshot().await;
        assert_eq!(latency[0].1.len(), 2);
    }
}
