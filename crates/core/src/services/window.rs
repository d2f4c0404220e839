//! Window planner - fetches one `limit`/`offset` window and decides whether
//! the total size of the sequence has to be counted.
//!
//! # Count avoidance
//!
//! Counting is usually the expensive part of a paginated query. A slice
//! that comes back shorter than the requested limit proves that nothing
//! follows it, so the total is simply `offset + returned`. Only a full
//! slice is ambiguous and needs a count.
//!
//! | returned `n`            | total            | counted |
//! |-------------------------|------------------|---------|
//! | `n == 0`, `offset == 0` | `0`              | no      |
//! | `0 < n < limit`         | `offset + n`     | no      |
//! | `n == limit`            | `count()`        | yes     |
//! | `n == 0`, `offset > 0`  | `count()`        | yes     |
//!
//! An empty window past the start cannot tell whether `offset` overshot
//! the end or the data shrank, so it counts.

use tracing::{debug, instrument, warn};

use crate::error::{PaginationError, PaginationResult, LIMIT_NOT_POSITIVE, OFFSET_NEGATIVE};
use crate::metrics::{
    record_count_query, record_count_skipped, record_oversized_request, record_page_size,
};
use crate::ports::{PageInfo, Sequence, SliceBounds};

use super::total_count::TotalCountSlot;

// =============================================================================
// Configuration
// =============================================================================

/// Static configuration of one paginated field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Ceiling on the effective page size. Unlimited requests are capped
    /// to it instead of fetching everything.
    pub hard_limit: Option<u64>,
    /// Requests asking for more than this many rows are logged and
    /// counted. Does not clamp anything by itself.
    pub warn_threshold: Option<u64>,
}

impl PaginationConfig {
    /// No clamping and no oversized-request reporting.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_hard_limit(hard_limit: u64) -> Self {
        Self {
            hard_limit: Some(hard_limit),
            ..Default::default()
        }
    }

    pub fn warn_above(mut self, threshold: u64) -> Self {
        self.warn_threshold = Some(threshold);
        self
    }

    /// Apply the hard limit to a requested limit.
    ///
    /// `min(requested, hard_limit)` when both exist, the hard limit alone
    /// for an unlimited request. Validation happens afterwards, so a
    /// non-positive request stays non-positive.
    pub fn effective_limit(&self, requested: Option<i64>) -> Option<i64> {
        let hard = self.hard_limit.map(|h| i64::try_from(h).unwrap_or(i64::MAX));
        match (requested, hard) {
            (Some(limit), Some(hard)) => Some(limit.min(hard)),
            (Some(limit), None) => Some(limit),
            (None, hard) => hard,
        }
    }

    fn is_oversized(&self, requested: i64) -> bool {
        let exceeds =
            |bound: Option<u64>| bound.is_some_and(|b| requested > 0 && (requested as u64) > b);
        exceeds(self.warn_threshold) || exceeds(self.hard_limit)
    }
}

// =============================================================================
// Window
// =============================================================================

/// How the total of a window was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountStrategy {
    /// No limit applied; the total was not resolved.
    Unbounded,
    /// Derived from the slice size, no count issued.
    Derived,
    /// Obtained with one full count.
    Counted,
}

impl CountStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            CountStrategy::Unbounded => "unbounded",
            CountStrategy::Derived => "derived",
            CountStrategy::Counted => "counted",
        }
    }
}

/// A materialized window and its page metadata.
#[derive(Debug, Clone)]
pub struct Window<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
    /// `None` only for [`CountStrategy::Unbounded`].
    pub total_count: Option<u64>,
    pub strategy: CountStrategy,
}

// =============================================================================
// WindowPlanner
// =============================================================================

/// Plans and fetches windows for one paginated field.
#[derive(Debug, Clone, Default)]
pub struct WindowPlanner {
    config: PaginationConfig,
}

impl WindowPlanner {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    /// Fetch the window `[offset, offset + limit)` of `sequence`.
    ///
    /// Validates before touching the store. Whenever a total is resolved
    /// it is written to `slot`; the unlimited branch leaves `slot` alone.
    #[instrument(skip(self, sequence, slot))]
    pub async fn plan<S: Sequence>(
        &self,
        sequence: &S,
        limit: Option<i64>,
        offset: i64,
        slot: &TotalCountSlot,
    ) -> PaginationResult<Window<S::Item>> {
        if let Some(requested) = limit {
            if self.config.is_oversized(requested) {
                warn!(
                    requested,
                    hard_limit = ?self.config.hard_limit,
                    threshold = ?self.config.warn_threshold,
                    "⚠️  Oversized pagination request"
                );
                record_oversized_request();
            }
        }

        let limit = self.config.effective_limit(limit);

        let Some(limit) = limit else {
            let items = sequence.materialize(SliceBounds::ALL).await?;
            record_page_size(items.len());
            debug!(returned = items.len(), strategy = "unbounded", "Window planned");
            return Ok(Window {
                items,
                page_info: PageInfo::default(),
                total_count: None,
                strategy: CountStrategy::Unbounded,
            });
        };

        if limit <= 0 {
            return Err(PaginationError::InvalidLimit(LIMIT_NOT_POSITIVE.to_string()));
        }
        if offset < 0 {
            return Err(PaginationError::InvalidOffset(OFFSET_NEGATIVE.to_string()));
        }

        let (limit, offset) = (limit as u64, offset as u64);
        let items = sequence
            .materialize(SliceBounds::window(offset, limit))
            .await?;
        let returned = items.len() as u64;
        record_page_size(items.len());

        let has_previous_page = offset > 0;
        let derivable = (returned == 0 && offset == 0) || (0 < returned && returned < limit);

        let (total, has_next_page, strategy) = if derivable {
            record_count_skipped();
            (offset + returned, false, CountStrategy::Derived)
        } else {
            let total = sequence.count().await?;
            record_count_query();
            (total, offset.saturating_add(limit) < total, CountStrategy::Counted)
        };

        slot.set(total);

        debug!(
            offset,
            limit,
            returned,
            total,
            strategy = strategy.as_str(),
            "Window planned"
        );

        Ok(Window {
            items,
            page_info: PageInfo {
                has_previous_page,
                has_next_page,
            },
            total_count: Some(total),
            strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    use crate::test_support::{fruits, CountingSequence};

    async fn plan(
        seq: &CountingSequence,
        config: PaginationConfig,
        limit: Option<i64>,
        offset: i64,
    ) -> (PaginationResult<Window<crate::test_support::Fruit>>, TotalCountSlot) {
        let slot = TotalCountSlot::new();
        let window = WindowPlanner::new(config).plan(seq, limit, offset, &slot).await;
        (window, slot)
    }

    // Last page: 2 of 3 rows returned proves the end, no count.
    #[tokio::test]
    async fn short_last_page_skips_count() {
        let seq = CountingSequence::new(fruits());
        let (window, slot) = plan(&seq, PaginationConfig::unbounded(), Some(3), 6).await;
        let window = window.unwrap();

        assert_eq!(window.items.len(), 2);
        assert_eq!(window.total_count, Some(8));
        assert_eq!(window.strategy, CountStrategy::Derived);
        assert!(window.page_info.has_previous_page);
        assert!(!window.page_info.has_next_page);
        assert_eq!(slot.get(), Some(8));
        assert_eq!(seq.calls.counted(), 0);
    }

    // Middle page: a full slice is ambiguous, exactly one count.
    #[tokio::test]
    async fn full_page_counts_once() {
        let seq = CountingSequence::new(fruits());
        let (window, slot) = plan(&seq, PaginationConfig::unbounded(), Some(3), 3).await;
        let window = window.unwrap();

        assert_eq!(window.items.len(), 3);
        assert_eq!(window.total_count, Some(8));
        assert_eq!(window.strategy, CountStrategy::Counted);
        assert!(window.page_info.has_previous_page);
        assert!(window.page_info.has_next_page);
        assert_eq!(slot.get(), Some(8));
        assert_eq!(seq.calls.counted(), 1);
    }

    #[tokio::test]
    async fn full_page_ending_exactly_at_total_has_no_next() {
        let seq = CountingSequence::new(fruits());
        let (window, _) = plan(&seq, PaginationConfig::unbounded(), Some(4), 4).await;
        let window = window.unwrap();

        assert_eq!(window.items.len(), 4);
        assert!(!window.page_info.has_next_page);
        assert_eq!(seq.calls.counted(), 1);
    }

    #[tokio::test]
    async fn empty_sequence_at_start_is_derived() {
        let seq = CountingSequence::new(Vec::new());
        let (window, slot) = plan(&seq, PaginationConfig::unbounded(), Some(5), 0).await;
        let window = window.unwrap();

        assert!(window.items.is_empty());
        assert_eq!(window.total_count, Some(0));
        assert_eq!(window.page_info, PageInfo::default());
        assert_eq!(slot.get(), Some(0));
        assert_eq!(seq.calls.counted(), 0);
    }

    // Empty window past the start counts: the slice alone cannot tell the total.
    #[tokio::test]
    async fn empty_window_past_start_counts() {
        let seq = CountingSequence::new(fruits());
        let (window, slot) = plan(&seq, PaginationConfig::unbounded(), Some(5), 20).await;
        let window = window.unwrap();

        assert!(window.items.is_empty());
        assert_eq!(window.total_count, Some(8));
        assert_eq!(window.strategy, CountStrategy::Counted);
        assert!(window.page_info.has_previous_page);
        assert!(!window.page_info.has_next_page);
        assert_eq!(slot.get(), Some(8));
        assert_eq!(seq.calls.counted(), 1);
    }

    #[tokio::test]
    async fn empty_sequence_past_start_counts_zero() {
        let seq = CountingSequence::new(Vec::new());
        let (window, _) = plan(&seq, PaginationConfig::unbounded(), Some(2), 4).await;
        let window = window.unwrap();

        assert_eq!(window.total_count, Some(0));
        assert!(window.page_info.has_previous_page);
        assert!(!window.page_info.has_next_page);
    }

    #[tokio::test]
    async fn unlimited_returns_everything_and_leaves_slot_empty() {
        let seq = CountingSequence::new(fruits());
        let (window, slot) = plan(&seq, PaginationConfig::unbounded(), None, 5).await;
        let window = window.unwrap();

        assert_eq!(window.items.len(), 8);
        assert_eq!(window.page_info, PageInfo::default());
        assert_eq!(window.total_count, None);
        assert_eq!(window.strategy, CountStrategy::Unbounded);
        assert_eq!(slot.get(), None);
        assert_eq!(seq.calls.counted(), 0);
    }

    #[tokio::test]
    async fn non_positive_limits_fail_before_fetching() {
        for limit in [0, -1] {
            let seq = CountingSequence::new(fruits());
            let (window, slot) = plan(&seq, PaginationConfig::unbounded(), Some(limit), 0).await;
            let err = window.unwrap_err();

            assert!(err.to_string().contains("positive integer"), "{limit}");
            assert_eq!(seq.calls.materialized(), 0);
            assert_eq!(slot.get(), None);
        }
    }

    #[tokio::test]
    async fn negative_offset_is_rejected() {
        let seq = CountingSequence::new(fruits());
        let (window, _) = plan(&seq, PaginationConfig::unbounded(), Some(3), -1).await;

        assert!(matches!(window, Err(PaginationError::InvalidOffset(_))));
        assert_eq!(seq.calls.materialized(), 0);
    }

    #[tokio::test]
    async fn hard_limit_caps_requests() {
        let seq = CountingSequence::new(fruits());
        let config = PaginationConfig::with_hard_limit(3);

        let (window, _) = plan(&seq, config.clone(), Some(10), 0).await;
        let window = window.unwrap();
        assert_eq!(window.items.len(), 3);
        assert!(window.page_info.has_next_page);

        let (window, _) = plan(&seq, config, None, 6).await;
        let window = window.unwrap();
        assert_eq!(window.items.len(), 2);
        assert_eq!(window.total_count, Some(8));
        assert_eq!(window.strategy, CountStrategy::Derived);
    }

    #[test]
    fn effective_limit_resolution() {
        let unbounded = PaginationConfig::unbounded();
        assert_eq!(unbounded.effective_limit(None), None);
        assert_eq!(unbounded.effective_limit(Some(7)), Some(7));

        let capped = PaginationConfig::with_hard_limit(5);
        assert_eq!(capped.effective_limit(None), Some(5));
        assert_eq!(capped.effective_limit(Some(7)), Some(5));
        assert_eq!(capped.effective_limit(Some(2)), Some(2));
        assert_eq!(capped.effective_limit(Some(-1)), Some(-1));
    }

    #[test]
    fn oversized_detection() {
        let config = PaginationConfig::with_hard_limit(10).warn_above(5);
        assert!(!config.is_oversized(5));
        assert!(config.is_oversized(6));
        assert!(!config.is_oversized(-3));
        assert!(!PaginationConfig::unbounded().is_oversized(1_000));
    }

    // Client-chosen limits must not turn into metric labels.
    #[test]
    fn oversized_limits_share_one_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        ::metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let seq = CountingSequence::new(fruits());
                for limit in 4..104 {
                    let (window, _) =
                        plan(&seq, PaginationConfig::with_hard_limit(3), Some(limit), 0).await;
                    assert_eq!(window.unwrap().items.len(), 3);
                }
            })
        });

        let rendered = handle.render();
        let series: Vec<&str> = rendered
            .lines()
            .filter(|line| line.starts_with("pagination_oversized_requests_total"))
            .collect();
        assert_eq!(series.len(), 1, "{series:?}");
        assert!(series[0].ends_with(" 100"), "{}", series[0]);
    }

    // Every window of the fixture agrees with the closed-form expectations.
    #[tokio::test]
    async fn windows_match_closed_form() {
        let n = 8i64;
        for limit in 1..=10i64 {
            for offset in 0..=10i64 {
                let seq = CountingSequence::new(fruits());
                let (window, slot) =
                    plan(&seq, PaginationConfig::unbounded(), Some(limit), offset).await;
                let window = window.unwrap();

                let expected_len = limit.min((n - offset).max(0)) as usize;
                assert_eq!(window.items.len(), expected_len, "limit={limit} offset={offset}");
                assert_eq!(window.total_count, Some(n as u64));
                assert_eq!(slot.get(), Some(n as u64));
                assert_eq!(window.page_info.has_next_page, offset + limit < n);
                assert_eq!(window.page_info.has_previous_page, offset > 0);
                assert!(seq.calls.counted() <= 1);
                if expected_len > 0 && (expected_len as i64) < limit {
                    assert_eq!(seq.calls.counted(), 0);
                }
            }
        }
    }
}
