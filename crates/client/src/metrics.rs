//! Prometheus metrics of the requests sent by a connection.
//!
//! With the subsystem `api_outbound` a connection registers:
//!
//! - `api_outbound_request_count` and `api_outbound_request_duration`, labelled
//!   with `apiservice`, `code`, `method` and `path`
//! - `api_outbound_token_request_count` and `api_outbound_token_request_duration`,
//!   labelled with `attempt` and `code`
//!
//! Identifiers are replaced by `-` in the `path` label, so
//! `/api/clusters_mgmt/v1/clusters/123` is counted as
//! `/api/clusters_mgmt/v1/clusters/-`. The `code` label is `0` when no response
//! was received.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};
use std::time::Duration;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

const BUCKETS: [f64; 4] = [0.1, 1.0, 10.0, 30.0];
const TOKEN_LABELS: [&str; 2] = ["attempt", "code"];
const CALL_LABELS: [&str; 4] = ["apiservice", "code", "method", "path"];

/// Metrics registered in the default registry, by subsystem. Connections that
/// share a subsystem share the collectors.
static DEFAULT_REGISTERED: LazyLock<Mutex<HashMap<String, Metrics>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

#[derive(Clone)]
pub(crate) struct Metrics {
    token_count: IntCounterVec,
    token_duration: HistogramVec,
    call_count: IntCounterVec,
    call_duration: HistogramVec,
}

impl Metrics {
    /// Creates the collectors of `subsystem` and registers them in `registry`,
    /// or in the default registry of the process.
    pub(crate) fn register(subsystem: &str, registry: Option<&Registry>) -> prometheus::Result<Self> {
        if let Some(registry) = registry {
            return Self::create(subsystem, registry);
        }
        let mut registered = DEFAULT_REGISTERED
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(metrics) = registered.get(subsystem) {
            return Ok(metrics.clone());
        }
        let metrics = Self::create(subsystem, prometheus::default_registry())?;
        registered.insert(subsystem.to_string(), metrics.clone());
        Ok(metrics)
    }

    fn create(subsystem: &str, registry: &Registry) -> prometheus::Result<Self> {
        let token_count = IntCounterVec::new(
            Opts::new("token_request_count", "Number of token requests sent.").subsystem(subsystem),
            &TOKEN_LABELS,
        )?;
        let token_duration = HistogramVec::new(
            HistogramOpts::new("token_request_duration", "Token request duration in seconds.")
                .subsystem(subsystem)
                .buckets(BUCKETS.to_vec()),
            &TOKEN_LABELS,
        )?;
        let call_count = IntCounterVec::new(
            Opts::new("request_count", "Number of requests sent.").subsystem(subsystem),
            &CALL_LABELS,
        )?;
        let call_duration = HistogramVec::new(
            HistogramOpts::new("request_duration", "Request duration in seconds.")
                .subsystem(subsystem)
                .buckets(BUCKETS.to_vec()),
            &CALL_LABELS,
        )?;
        registry.register(Box::new(token_count.clone()))?;
        registry.register(Box::new(token_duration.clone()))?;
        registry.register(Box::new(call_count.clone()))?;
        registry.register(Box::new(call_duration.clone()))?;
        Ok(Self {
            token_count,
            token_duration,
            call_count,
            call_duration,
        })
    }

    pub(crate) fn token_request(&self, code: u16, elapsed: Duration) {
        let code = code.to_string();
        let labels = ["1", code.as_str()];
        self.token_count.with_label_values(&labels).inc();
        self.token_duration
            .with_label_values(&labels)
            .observe(elapsed.as_secs_f64());
    }

    /// Records one API request; `path` is the path with identifiers replaced.
    pub(crate) fn api_request(&self, method: &str, path: &str, code: u16, elapsed: Duration) {
        let service = api_service(path);
        let code = code.to_string();
        let labels = [service.as_str(), code.as_str(), method, path];
        self.call_count.with_label_values(&labels).inc();
        self.call_duration
            .with_label_values(&labels)
            .observe(elapsed.as_secs_f64());
    }
}

/// Value of the `apiservice` label for a request path.
pub(crate) fn api_service(path: &str) -> String {
    const SERVICES: [(&str, &str); 4] = [
        ("/api/accounts_mgmt", "ocm-accounts-service"),
        ("/api/clusters_mgmt", "ocm-clusters-service"),
        ("/api/authorizations", "ocm-authorizations-service"),
        ("/api/service_logs", "ocm-logs-service"),
    ];
    if let Some((_, service)) = SERVICES.iter().find(|(prefix, _)| path.starts_with(prefix)) {
        return service.to_string();
    }
    let head: Vec<&str> = path.split('/').take(3).collect();
    format!("ocm-{}", head.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::proto::MetricFamily;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|family| family.get_name() == name)
            .unwrap_or_else(|| panic!("metric {name} isn't registered"))
    }

    fn label<'a>(family: &'a MetricFamily, name: &str) -> &'a str {
        family.get_metric()[0]
            .get_label()
            .iter()
            .find(|pair| pair.get_name() == name)
            .map(|pair| pair.get_value())
            .unwrap_or_default()
    }

    #[test]
    fn services_are_named_after_the_path() {
        assert_eq!(api_service("/api/clusters_mgmt/v1/clusters/-"), "ocm-clusters-service");
        assert_eq!(api_service("/api/accounts_mgmt/v1/current_account"), "ocm-accounts-service");
        assert_eq!(api_service("/api/authorizations/v1/access_review"), "ocm-authorizations-service");
        assert_eq!(api_service("/api/service_logs/v1/cluster_logs"), "ocm-logs-service");
        assert_eq!(api_service("/api/upgrades_info/v1/graph"), "ocm-/api/upgrades_info");
    }

    #[test]
    fn requests_are_counted_with_labels() {
        let registry = Registry::new();
        let metrics = Metrics::register("api_outbound", Some(&registry)).unwrap();
        metrics.api_request("GET", "/api/clusters_mgmt/v1/clusters/-", 200, Duration::from_millis(20));
        metrics.api_request("GET", "/api/clusters_mgmt/v1/clusters/-", 200, Duration::from_millis(30));
        metrics.token_request(0, Duration::from_secs(2));

        let families = registry.gather();
        let count = family(&families, "api_outbound_request_count");
        assert_eq!(count.get_metric()[0].get_counter().get_value(), 2.0);
        assert_eq!(label(count, "apiservice"), "ocm-clusters-service");
        assert_eq!(label(count, "path"), "/api/clusters_mgmt/v1/clusters/-");
        assert_eq!(label(count, "method"), "GET");
        assert_eq!(label(count, "code"), "200");

        let duration = family(&families, "api_outbound_request_duration");
        assert_eq!(duration.get_metric()[0].get_histogram().get_sample_count(), 2);

        let tokens = family(&families, "api_outbound_token_request_count");
        assert_eq!(label(tokens, "code"), "0");
        assert_eq!(label(tokens, "attempt"), "1");
        let token_duration = family(&families, "api_outbound_token_request_duration");
        let buckets = token_duration.get_metric()[0].get_histogram().get_bucket();
        assert_eq!(buckets.len(), BUCKETS.len());
        assert_eq!(buckets[2].get_cumulative_count(), 1);
    }

    #[test]
    fn registering_twice_in_one_registry_fails() {
        let registry = Registry::new();
        Metrics::register("twice", Some(&registry)).unwrap();
        assert!(Metrics::register("twice", Some(&registry)).is_err());
    }

    #[test]
    fn default_registry_collectors_are_shared() {
        let first = Metrics::register("shared_outbound", None).unwrap();
        let second = Metrics::register("shared_outbound", None).unwrap();
        first.token_request(200, Duration::from_millis(5));
        second.token_request(200, Duration::from_millis(5));
        let value = first.token_count.with_label_values(&["1", "200"]).get();
        assert_eq!(value, 2);
    }
}
