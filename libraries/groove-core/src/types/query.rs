//! Album listing filters and ordering
//!
//! Both storage backends evaluate these rules; the in-memory store applies
//! them directly and the SQLite store translates them into SQL with the same
//! semantics.

use super::{Album, GenreId};
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Release-date window ending at the evaluation instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    Month,
    Year,
}

impl Timeframe {
    /// Earliest release date still inside the window ending at `now`.
    pub fn window_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let start = match self {
            Timeframe::Week => now.checked_sub_signed(Duration::days(7)),
            Timeframe::Month => now.checked_sub_months(Months::new(1)),
            Timeframe::Year => now.checked_sub_months(Months::new(12)),
        };
        start.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Inclusive on both ends.
    pub fn contains(self, now: DateTime<Utc>, release_date: DateTime<Utc>) -> bool {
        release_date >= self.window_start(now) && release_date <= now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Title,
    ReleaseDate,
    Artist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Row filters shared by album listing and album counting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumFilter {
    pub genre_id: Option<GenreId>,
    /// Case-insensitive substring of the album title or the artist name
    pub search: Option<String>,
    pub timeframe: Option<Timeframe>,
}

impl AlbumFilter {
    /// Lowercased search term, or `None` when no search applies.
    ///
    /// Case folding is ASCII-only so that it agrees with SQLite's `lower()`.
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(|term| term.to_ascii_lowercase())
    }

    /// Evaluate the filter against one album.
    pub fn matches(&self, album: &Album, artist_name: Option<&str>, now: DateTime<Utc>) -> bool {
        if let Some(genre_id) = self.genre_id {
            if album.genre_id != genre_id {
                return false;
            }
        }

        if let Some(needle) = self.search_needle() {
            let in_title = album.title.to_ascii_lowercase().contains(&needle);
            let in_artist = artist_name
                .map(|name| name.to_ascii_lowercase().contains(&needle))
                .unwrap_or(false);
            if !in_title && !in_artist {
                return false;
            }
        }

        if let Some(timeframe) = self.timeframe {
            if !timeframe.contains(now, album.release_date) {
                return false;
            }
        }

        true
    }
}

/// Full listing request: filter, ordering, pagination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumQuery {
    pub filter: AlbumFilter,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    /// Pagination only applies when a limit is given
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl AlbumQuery {
    pub fn with_filter(filter: AlbumFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Newest first unless told otherwise.
    pub fn effective_sort(&self) -> (SortBy, SortOrder) {
        (
            self.sort_by.unwrap_or(SortBy::ReleaseDate),
            self.sort_order.unwrap_or(SortOrder::Desc),
        )
    }

    /// `(offset, limit)` when paginating.
    pub fn page(&self) -> Option<(usize, usize)> {
        self.limit.map(|limit| {
            let offset = self.offset.unwrap_or(0).max(0) as usize;
            (offset, limit.max(0) as usize)
        })
    }
}
