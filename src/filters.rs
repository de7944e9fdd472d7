// ABOUTME: Filter and sort state for the job list
// ABOUTME: Maps the filter record to list query parameters and tracks field edits and resets

use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, Result};
use crate::remote::models::JobType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    PostingDateDesc,
    PostingDateAsc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PostingDateDesc => "posting_date_desc",
            SortOrder::PostingDateAsc => "posting_date_asc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::PostingDateDesc => "Date: Newest First",
            SortOrder::PostingDateAsc => "Date: Oldest First",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "posting_date_desc" | "desc" | "newest" => Ok(SortOrder::PostingDateDesc),
            "posting_date_asc" | "asc" | "oldest" => Ok(SortOrder::PostingDateAsc),
            other => Err(BoardError::Validation(format!(
                "unknown sort order '{}' (expected posting_date_desc or posting_date_asc)",
                other
            ))),
        }
    }
}

/// The filter record sent with every list request.
///
/// Empty strings mean "not filtered". `Filters::default()` carries no sort
/// either, so it produces a request without any query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub search: String,
    pub job_type: String,
    pub location: String,
    pub tag: String,
    pub sort: Option<SortOrder>,
}

impl Filters {
    /// Query parameters for `GET /jobs`, non-empty fields only, in wire order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for (key, value) in [
            ("job_type", &self.job_type),
            ("location", &self.location),
            ("tag", &self.tag),
            ("search", &self.search),
        ] {
            if !value.is_empty() {
                pairs.push((key, value.clone()));
            }
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        pairs
    }

    /// Sort is not a filter and does not count here.
    pub fn has_active(&self) -> bool {
        !self.search.is_empty()
            || !self.job_type.is_empty()
            || !self.location.is_empty()
            || !self.tag.is_empty()
    }

    /// Summary of the active filters, one chip per field.
    pub fn chips(&self) -> Vec<String> {
        let mut chips = Vec::new();
        if !self.search.is_empty() {
            chips.push(format!("Search: {}", self.search));
        }
        if !self.job_type.is_empty() {
            chips.push(format!("Type: {}", self.job_type));
        }
        if !self.location.is_empty() {
            chips.push(format!("Location: {}", self.location));
        }
        if !self.tag.is_empty() {
            chips.push(format!("Tag: {}", self.tag));
        }
        chips
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    JobType,
    Location,
    Tag,
    Sort,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Search,
        FilterField::JobType,
        FilterField::Location,
        FilterField::Tag,
        FilterField::Sort,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilterField::Search => "search",
            FilterField::JobType => "job_type",
            FilterField::Location => "location",
            FilterField::Tag => "tag",
            FilterField::Sort => "sort",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Search => "Search by Title or Company",
            FilterField::JobType => "Job Type",
            FilterField::Location => "Location",
            FilterField::Tag => "Tag/Keyword",
            FilterField::Sort => "Sort By",
        }
    }
}

/// What the holder tells the orchestrator after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Changed(Filters),
    /// Distinct from a change with empty values: fetch with no parameters.
    Reset,
}

/// Owns the editable filter panel state.
#[derive(Debug, Clone)]
pub struct FilterSort {
    filters: Filters,
}

impl Default for FilterSort {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSort {
    pub fn new() -> Self {
        Self {
            filters: Self::defaults(),
        }
    }

    fn defaults() -> Filters {
        Filters {
            sort: Some(SortOrder::default()),
            ..Filters::default()
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active()
    }

    pub fn can_reset(&self) -> bool {
        self.has_active_filters()
    }

    /// Replace one field and emit the full record.
    ///
    /// A job type must be empty or one of the known types; it is stored with
    /// its canonical label.
    pub fn on_field_change(
        &mut self,
        field: FilterField,
        value: impl Into<String>,
    ) -> Result<FilterEvent> {
        let value = value.into();
        match field {
            FilterField::Search => self.filters.search = value,
            FilterField::Location => self.filters.location = value,
            FilterField::Tag => self.filters.tag = value,
            FilterField::JobType => {
                self.filters.job_type = if value.is_empty() {
                    value
                } else {
                    value.parse::<JobType>()?.label().to_string()
                };
            }
            FilterField::Sort => self.filters.sort = Some(value.parse()?),
        }
        Ok(FilterEvent::Changed(self.filters.clone()))
    }

    pub fn on_reset(&mut self) -> FilterEvent {
        self.filters = Self::defaults();
        FilterEvent::Reset
    }
}
