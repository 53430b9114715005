//! Reshaping fetched collections for display: search, pagination, and
//! analytics grouping.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::entities::{AnalyticContentForm, Record};
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Free-text search over the fields a table shows.
pub trait Searchable {
    /// Text fields the query is matched against.
    fn haystack(&self) -> Vec<&str>;

    /// Case-insensitive substring match; an empty query matches everything.
    fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.haystack()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Keep only the items matching `query`.
pub fn search<T: Searchable>(items: Vec<T>, query: &str) -> Vec<T> {
    items.into_iter().filter(|item| item.matches(query)).collect()
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a collection. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `items` into the requested page.
///
/// A zero page size falls back to [`DEFAULT_PAGE_SIZE`]; a page past the end
/// is clamped to the last page (page 1 for an empty collection).
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = if per_page == 0 { DEFAULT_PAGE_SIZE } else { per_page };
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let items = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

// ---------------------------------------------------------------------------
// Analytics grouping
// ---------------------------------------------------------------------------

/// Analytics rows sharing a date and topic, with summed counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticGroup {
    pub date: Option<Date>,
    pub topic: String,
    pub row_ids: Vec<DbId>,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

/// Group rows by `(date, topic)`, newest date first, then topic A–Z.
/// Rows without a date come last. Topics are compared after trimming.
pub fn group_by_date_topic(rows: &[Record<AnalyticContentForm>]) -> Vec<AnalyticGroup> {
    let mut groups: BTreeMap<(Reverse<Option<Date>>, String), AnalyticGroup> = BTreeMap::new();

    for row in rows {
        let topic = row.fields.topic.trim().to_string();
        let group = groups
            .entry((Reverse(row.fields.date), topic.clone()))
            .or_insert_with(|| AnalyticGroup {
                date: row.fields.date,
                topic,
                row_ids: Vec::new(),
                views: 0,
                likes: 0,
                comments: 0,
                shares: 0,
            });
        group.row_ids.push(row.id);
        group.views += row.fields.views.unwrap_or(0);
        group.likes += row.fields.likes.unwrap_or(0);
        group.comments += row.fields.comments.unwrap_or(0);
        group.shares += row.fields.shares.unwrap_or(0);
    }

    groups.into_values().collect()
}
