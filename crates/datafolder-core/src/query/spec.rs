//! Per-request query parameters.
//!
//! A [`QuerySpec`] is built from the query string of a list request. Parsing
//! is lenient: reserved parameters that fail to parse keep their defaults and
//! every other parameter becomes an equality filter, which the engine drops
//! later if the table has no such column.

/// Reserved parameter: page size.
pub const LIMIT_PARAM: &str = "_limit";
/// Reserved parameter: rows to skip.
pub const OFFSET_PARAM: &str = "_offset";
/// Reserved parameter: sort column, `-` prefix for descending.
pub const SORT_PARAM: &str = "_sort";
/// Sample endpoint parameter: number of rows to draw.
pub const SAMPLE_SIZE_PARAM: &str = "n";

/// Default page size.
pub const DEFAULT_LIMIT: usize = 100;
/// Default number of sampled rows.
pub const DEFAULT_SAMPLE_SIZE: i64 = 10;

/// One equality predicate, value still in request text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Column to compare.
    pub column: String,
    /// Raw comparison text; coerced to the column type at execution.
    pub value: String,
}

/// Single-key sort request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Column to sort by.
    pub column: String,
    /// Sort largest first.
    pub descending: bool,
}

impl SortSpec {
    /// Parse `col` / `-col`. All leading `-` are stripped from the column
    /// name; an empty input means no sort.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            column: raw.trim_start_matches('-').to_string(),
            descending: raw.starts_with('-'),
        })
    }

    /// Ascending sort on `column`.
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    /// Descending sort on `column`.
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// Filters, sort and pagination of one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Equality predicates, combined with AND.
    pub filters: Vec<Filter>,
    /// Optional sort key.
    pub sort: Option<SortSpec>,
    /// Rows to skip after filtering and sorting.
    pub offset: usize,
    /// Maximum rows to return.
    pub limit: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sort: None,
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl QuerySpec {
    /// Build a spec from decoded query-string pairs.
    ///
    /// For repeated filter keys the last value wins.
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut spec = QuerySpec::default();
        for (key, value) in params {
            match key {
                LIMIT_PARAM => spec.limit = parse_count(value).unwrap_or(DEFAULT_LIMIT),
                OFFSET_PARAM => spec.offset = parse_count(value).unwrap_or(0),
                SORT_PARAM => spec.sort = SortSpec::parse(value),
                _ => spec.set_filter(key, value),
            }
        }
        spec
    }

    /// Add an equality filter, replacing any earlier filter on `column`.
    pub fn with_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        let column = column.into();
        self.set_filter(&column, value);
        self
    }

    /// Set the sort key.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set the number of rows to skip.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn set_filter(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        match self.filters.iter_mut().find(|f| f.column == column) {
            Some(existing) => existing.value = value,
            None => self.filters.push(Filter {
                column: column.to_string(),
                value,
            }),
        }
    }
}

/// Parse a non-negative count; negative numbers clamp to zero and anything
/// unparseable yields `None`.
fn parse_count(raw: &str) -> Option<usize> {
    let n: i64 = raw.trim().parse().ok()?;
    Some(usize::try_from(n).unwrap_or(0))
}

/// Parse the `n` parameter of the sample endpoint, defaulting to
/// [`DEFAULT_SAMPLE_SIZE`] when missing or malformed.
pub fn parse_sample_size(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_SAMPLE_SIZE)
}
