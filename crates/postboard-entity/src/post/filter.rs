//! Listing filters and pagination.

use serde::{Deserialize, Serialize};

use super::model::Post;

/// Sort order for post listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostSort {
    /// Ascending id.
    #[default]
    #[serde(rename = "id")]
    IdAsc,
    /// Descending id.
    #[serde(rename = "-id")]
    IdDesc,
    /// Ascending title, ties by id.
    #[serde(rename = "title")]
    TitleAsc,
    /// Descending title, ties by id.
    #[serde(rename = "-title")]
    TitleDesc,
}

impl PostSort {
    /// Every accepted query-string form.
    pub const SAFELIST: [&'static str; 4] = ["id", "title", "-id", "-title"];

    /// Parse a query-string value against the safelist.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::IdAsc),
            "-id" => Some(Self::IdDesc),
            "title" => Some(Self::TitleAsc),
            "-title" => Some(Self::TitleDesc),
            _ => None,
        }
    }

    /// `ORDER BY` clause. Only ever built from the safelist.
    pub fn order_by(&self) -> &'static str {
        match self {
            Self::IdAsc => "id ASC",
            Self::IdDesc => "id DESC",
            Self::TitleAsc => "title ASC, id ASC",
            Self::TitleDesc => "title DESC, id ASC",
        }
    }
}

/// Criteria for listing posts.
#[derive(Debug, Clone)]
pub struct PostFilter {
    /// Case-insensitive title substring.
    pub title: Option<String>,
    /// Tags that must all be present.
    pub tags: Vec<String>,
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Ordering.
    pub sort: PostSort,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            title: None,
            tags: Vec::new(),
            page: 1,
            page_size: 20,
            sort: PostSort::default(),
        }
    }
}

impl PostFilter {
    /// Row offset for the requested page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }

    /// Whether a post satisfies the title and tag criteria.
    pub fn matches(&self, post: &Post) -> bool {
        let title_ok = self.title.as_ref().is_none_or(|t| {
            post.title.to_lowercase().contains(&t.to_lowercase())
        });
        title_ok && self.tags.iter().all(|t| post.tags.contains(t))
    }
}

/// Pagination metadata returned alongside a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Requested page.
    pub current_page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// First page number.
    pub first_page: u32,
    /// Last page number.
    pub last_page: u32,
    /// Total matching records.
    pub total_records: i64,
}

impl PageMetadata {
    /// Build metadata for a listing. Empty result sets produce zeroed metadata.
    pub fn calculate(total_records: i64, page: u32, page_size: u32) -> Self {
        if total_records == 0 || page_size == 0 {
            return Self::default();
        }
        let size = i64::from(page_size);
        let last = (total_records + size - 1) / size;
        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: u32::try_from(last).unwrap_or(u32::MAX),
            total_records,
        }
    }
}

/// One page of posts.
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    /// Posts on this page.
    pub posts: Vec<Post>,
    /// Pagination metadata.
    pub metadata: PageMetadata,
}
