//! Metrics definitions for pagination.
//!
//! Metrics are collected using the `metrics` crate and can be exported
//! to Prometheus via `metrics-exporter-prometheus`. Without an installed
//! recorder every call here is a no-op.

use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Initialize all metric descriptions.
/// Call this once at startup before any metrics are recorded.
pub fn init_metrics() {
    describe_counter!(
        "pagination_count_queries_total",
        "Total number of full count operations issued against a sequence"
    );
    describe_counter!(
        "pagination_count_skipped_total",
        "Total number of windows whose total was derived from the slice size"
    );
    describe_counter!(
        "pagination_oversized_requests_total",
        "Total number of requests asking for more rows than the configured threshold"
    );
    describe_counter!(
        "pagination_total_count_cache_hits_total",
        "Total number of totalCount resolutions served from the request cache"
    );
    describe_histogram!(
        "pagination_page_size",
        "Number of elements materialized per window"
    );
}

/// Record a full count against the backing store.
pub fn record_count_query() {
    counter!("pagination_count_queries_total").increment(1);
}

/// Record a total derived without counting.
pub fn record_count_skipped() {
    counter!("pagination_count_skipped_total").increment(1);
}

/// Record an oversized request.
///
/// Unlabelled: the requested limit comes from the client and would make
/// the series count unbounded. It is logged by the planner instead.
pub fn record_oversized_request() {
    counter!("pagination_oversized_requests_total").increment(1);
}

/// Record a totalCount served from the cache.
pub fn record_cache_hit() {
    counter!("pagination_total_count_cache_hits_total").increment(1);
}

/// Record the number of elements in a materialized window.
pub fn record_page_size(size: usize) {
    histogram!("pagination_page_size").record(size as f64);
}

