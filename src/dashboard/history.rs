//! History browsing: pagination, expansion, and response ordering

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::experiment::{MetricKey, ResponseRecord};

/// Responses shown per history page.
pub const RESPONSES_PER_PAGE: usize = 10;

/// Page buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// Number of pages for `len` responses (`0` when there are none).
#[must_use]
pub const fn total_pages(len: usize) -> usize {
    len.div_ceil(RESPONSES_PER_PAGE)
}

/// The responses on 1-based `page`; empty past the end.
#[must_use]
pub fn page_slice(responses: &[ResponseRecord], page: usize) -> &[ResponseRecord] {
    let start = page.saturating_sub(1).saturating_mul(RESPONSES_PER_PAGE);
    if start >= responses.len() {
        return &[];
    }
    let end = (start + RESPONSES_PER_PAGE).min(responses.len());
    &responses[start..end]
}

/// Page numbers for the pager: up to five, starting at
/// `max(1, min(total - 4, current - 2))`.
#[must_use]
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let first = total
        .saturating_sub(PAGE_WINDOW - 1)
        .min(current.saturating_sub(2))
        .max(1);
    (first..first + PAGE_WINDOW).take_while(|&p| p <= total).collect()
}

/// Responses ordered by `metric`, best first. Ties keep backend order.
#[must_use]
pub fn sort_responses(responses: &[ResponseRecord], metric: MetricKey) -> Vec<&ResponseRecord> {
    let mut sorted: Vec<&ResponseRecord> = responses.iter().collect();
    sorted.sort_by(|a, b| b.metrics.get(metric).total_cmp(&a.metrics.get(metric)));
    sorted
}

/// What the history tab is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryView {
    /// Selected experiment id
    pub selected: Option<String>,
    /// 1-based page
    pub current_page: usize,
    /// Global indices of expanded response cards
    pub expanded: BTreeSet<usize>,
}

impl HistoryView {
    /// Select an experiment: first page, nothing expanded.
    #[must_use]
    pub fn select(id: impl Into<String>) -> Self {
        Self {
            selected: Some(id.into()),
            current_page: 1,
            expanded: BTreeSet::new(),
        }
    }

    /// Move to `page`, clamped to `[1, total]`, collapsing expansions.
    #[must_use]
    pub fn with_page(self, page: usize, total: usize) -> Self {
        Self {
            current_page: page.clamp(1, total.max(1)),
            expanded: BTreeSet::new(),
            ..self
        }
    }

    /// Expand or collapse the card at `global_index`.
    #[must_use]
    pub fn toggled(mut self, global_index: usize) -> Self {
        if !self.expanded.remove(&global_index) {
            self.expanded.insert(global_index);
        }
        self
    }

    /// Global index of the `i`-th card on the current page.
    #[must_use]
    pub const fn global_index(&self, i: usize) -> usize {
        self.current_page.saturating_sub(1) * RESPONSES_PER_PAGE + i
    }
}
