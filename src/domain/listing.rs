use std::collections::HashMap;

use chrono::{DateTime, Utc};
use regex::RegexBuilder;
use serde::{Serialize, Serializer};

use crate::entities::comment::Comment;

pub const PAGE_SIZE: usize = 10;

// ───── View Controls ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentFilter {
    #[default]
    All,
    Pinned,
}

impl CommentFilter {
    pub fn parse(value: &str) -> Self {
        match value {
            "pinned" => CommentFilter::Pinned,
            _ => CommentFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentFilter::All => "all",
            CommentFilter::Pinned => "pinned",
        }
    }
}

/// The three independent controls of the comment view. Changing the filter
/// or the search query resets the page to 1; a refetch of the underlying
/// collection does not touch the page (it is clamped into range when the
/// view is built instead).
#[derive(Debug, Clone, PartialEq)]
pub struct ListControls {
    pub filter: CommentFilter,
    pub search: String,
    pub page: usize,
}

impl Default for ListControls {
    fn default() -> Self {
        ListControls {
            filter: CommentFilter::All,
            search: String::new(),
            page: 1,
        }
    }
}

impl ListControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_filter(&mut self, filter: CommentFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.page = 1;
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.search != search {
            self.search = search;
            self.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Builds controls from raw query parameters, defaulting any missing or
    /// unparsable value.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        ListControls {
            filter: query
                .get("filter")
                .map(|v| CommentFilter::parse(v))
                .unwrap_or_default(),
            search: query.get("search").cloned().unwrap_or_default(),
            page: query
                .get("page")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(1)
                .max(1),
        }
    }
}

// ───── Derived Computation ──────────────────────────────────────────

/// Filter then search, both over the full in-memory collection. The search
/// is a case-insensitive substring match against the raw author name (absent
/// names match as the empty string) or the content; a blank query is the
/// identity.
pub fn filter_comments<'a>(
    comments: &'a [Comment],
    filter: CommentFilter,
    search: &str,
) -> Vec<&'a Comment> {
    let query = search.trim().to_lowercase();

    comments
        .iter()
        .filter(|c| match filter {
            CommentFilter::All => true,
            CommentFilter::Pinned => c.is_pinned,
        })
        .filter(|c| {
            if query.is_empty() {
                return true;
            }
            c.user_name
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&query)
                || c.content.to_lowercase().contains(&query)
        })
        .collect()
}

pub fn total_pages(filtered_len: usize) -> usize {
    filtered_len.div_ceil(PAGE_SIZE).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages)
}

pub fn page_slice<'a, 'c>(filtered: &'a [&'c Comment], page: usize) -> &'a [&'c Comment] {
    let start = (page.saturating_sub(1) * PAGE_SIZE).min(filtered.len());
    let end = (page * PAGE_SIZE).min(filtered.len());
    &filtered[start..end]
}

// ───── Page-Number Strip ────────────────────────────────────────────

/// One slot of the page-number strip: either a page number or a collapsed
/// run of hidden pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMark {
    Page(usize),
    Gap,
}

impl Serialize for PageMark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageMark::Page(n) => serializer.serialize_u64(*n as u64),
            PageMark::Gap => serializer.serialize_str("…"),
        }
    }
}

/// First page, last page, and current ± 1, with every skipped run collapsed
/// into a single gap marker: page 5 of 20 renders as `1 … 4 5 6 … 20`.
pub fn page_strip(current: usize, total: usize) -> Vec<PageMark> {
    let mut strip = Vec::new();
    let mut prev = 0usize;

    for page in 1..=total {
        let shown = page == 1 || page == total || page.abs_diff(current) <= 1;
        if !shown {
            continue;
        }
        if prev != 0 && page != prev + 1 {
            strip.push(PageMark::Gap);
        }
        strip.push(PageMark::Page(page));
        prev = page;
    }

    strip
}

// ───── Search Highlighting ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub text: String,
    pub matched: bool,
}

/// Splits `text` into spans, marking every case-insensitive occurrence of
/// the query. The query is escaped before the pattern is built, so regex
/// metacharacters in operator input match literally.
pub fn highlight(text: &str, query: &str) -> Vec<HighlightSpan> {
    if text.is_empty() {
        return Vec::new();
    }

    let query = query.trim();
    if query.is_empty() {
        return vec![HighlightSpan {
            text: text.to_string(),
            matched: false,
        }];
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        // An escaped literal always compiles; if it somehow does not,
        // render the text unhighlighted rather than fail the view.
        Err(_) => {
            return vec![HighlightSpan {
                text: text.to_string(),
                matched: false,
            }];
        }
    };

    let mut spans = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            spans.push(HighlightSpan {
                text: text[last..m.start()].to_string(),
                matched: false,
            });
        }
        spans.push(HighlightSpan {
            text: m.as_str().to_string(),
            matched: true,
        });
        last = m.end();
    }
    if last < text.len() {
        spans.push(HighlightSpan {
            text: text[last..].to_string(),
            matched: false,
        });
    }

    spans
}

// ───── View Assembly ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub user_name: Vec<HighlightSpan>,
    pub content: Vec<HighlightSpan>,
    pub profile_image: String,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
}

impl CommentView {
    fn project(comment: &Comment, search: &str) -> Self {
        CommentView {
            id: comment.id,
            user_name: highlight(comment.display_name(), search),
            content: highlight(&comment.content, search),
            profile_image: comment.avatar().to_string(),
            is_pinned: comment.is_pinned,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentListView {
    pub total: usize,
    pub pinned_count: usize,
    pub filtered_total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_strip: Vec<PageMark>,
    pub comments: Vec<CommentView>,
}

/// The whole comment view as one pure derived computation:
/// filter → search → clamp page → slice → highlight.
pub fn build_view(comments: &[Comment], controls: &ListControls) -> CommentListView {
    let filtered = filter_comments(comments, controls.filter, &controls.search);
    let total_pages = total_pages(filtered.len());
    let page = clamp_page(controls.page, total_pages);
    let items = page_slice(&filtered, page);

    CommentListView {
        total: comments.len(),
        pinned_count: comments.iter().filter(|c| c.is_pinned).count(),
        filtered_total: filtered.len(),
        page,
        total_pages,
        page_strip: page_strip(page, total_pages),
        comments: items
            .iter()
            .map(|c| CommentView::project(c, &controls.search))
            .collect(),
    }
}
