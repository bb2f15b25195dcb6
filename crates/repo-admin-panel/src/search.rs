//! Search configuration for list views.
//!
//! List views never interpret search results. They assemble the inputs
//! (app name, facets, sort options, API endpoint, request headers) and hand
//! them to [`search_app_config`], which produces the [`SearchAppConfig`]
//! object the search template feeds to the frontend search application.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Page sizes offered by the pagination widget.
pub const DEFAULT_PAGINATION_OPTIONS: [usize; 3] = [10, 20, 50];

/// Page size used on first load.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A facet (aggregation) the search UI can filter on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    /// Aggregation name, as returned by the search backend.
    pub name: String,
    /// Human-readable title.
    pub title: String,
    /// The indexed field the facet aggregates over.
    pub field: String,
}

impl FacetOption {
    /// Creates a facet.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            field: field.into(),
        }
    }
}

/// A sort option offered by the search UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    /// The value sent as the `sort` query parameter.
    pub name: String,
    /// Human-readable title.
    pub title: String,
    /// Index fields sorted on (prefix with "-" for descending).
    #[serde(default)]
    pub fields: Vec<String>,
}

impl SortOption {
    /// Creates a sort option.
    pub fn new(name: impl Into<String>, title: impl Into<String>, fields: Vec<&str>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            fields: fields.into_iter().map(String::from).collect(),
        }
    }
}

/// Service-level search configuration exposed by a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Facets configured on the service.
    pub facets: Vec<FacetOption>,
    /// Sort options configured on the service, default first.
    pub sort_options: Vec<SortOption>,
}

/// The initial state of the search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialQueryState {
    /// The query string.
    pub query_string: String,
    /// The sort option applied first.
    pub sort_by: Option<String>,
    /// The first page.
    pub page: usize,
    /// The page size.
    pub size: usize,
}

/// API coordinates the frontend search application talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchApi {
    /// The search endpoint URL.
    pub url: String,
    /// Headers sent with every search request.
    pub headers: BTreeMap<String, String>,
    /// Whether cookies are sent with the request.
    #[serde(rename = "withCredentials")]
    pub with_credentials: bool,
}

/// A facet as presented to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// Human-readable title.
    pub title: String,
    /// Aggregation name.
    pub agg_name: String,
    /// The indexed field.
    pub field: String,
}

/// A sort option as presented to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortChoice {
    /// The value sent as the `sort` query parameter.
    pub sort_by: String,
    /// Human-readable title.
    pub text: String,
}

/// The configuration object consumed by the search template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAppConfig {
    /// Identifier of the search application (e.g. `RECORDS_SEARCH`).
    pub app_id: String,
    /// Initial query state.
    pub initial_query_state: InitialQueryState,
    /// Search API coordinates.
    pub search_api: SearchApi,
    /// Available sort options.
    pub sort_options: Vec<SortChoice>,
    /// Available facets.
    pub aggs: Vec<Aggregation>,
    /// Page sizes offered by the pagination widget.
    pub pagination_options: Vec<usize>,
    /// The default page size.
    pub default_size: usize,
}

/// Builds the search application configuration for a list view.
///
/// The first sort option becomes the initial sort.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use repo_admin_panel::search::{search_app_config, SortOption};
///
/// let config = search_app_config(
///     "RECORDS_SEARCH",
///     &[],
///     &[SortOption::new("newest", "Newest", vec!["-created"])],
///     "/api/records",
///     &BTreeMap::new(),
/// );
/// assert_eq!(config.app_id, "RECORDS_SEARCH");
/// assert_eq!(config.initial_query_state.sort_by.as_deref(), Some("newest"));
/// ```
pub fn search_app_config(
    config_name: &str,
    available_facets: &[FacetOption],
    sort_options: &[SortOption],
    endpoint: &str,
    headers: &BTreeMap<String, String>,
) -> SearchAppConfig {
    SearchAppConfig {
        app_id: config_name.to_string(),
        initial_query_state: InitialQueryState {
            query_string: String::new(),
            sort_by: sort_options.first().map(|s| s.name.clone()),
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        },
        search_api: SearchApi {
            url: endpoint.to_string(),
            headers: headers.clone(),
            with_credentials: true,
        },
        sort_options: sort_options
            .iter()
            .map(|s| SortChoice {
                sort_by: s.name.clone(),
                text: s.title.clone(),
            })
            .collect(),
        aggs: available_facets
            .iter()
            .map(|f| Aggregation {
                title: f.title.clone(),
                agg_name: f.name.clone(),
                field: f.field.clone(),
            })
            .collect(),
        pagination_options: DEFAULT_PAGINATION_OPTIONS.to_vec(),
        default_size: DEFAULT_PAGE_SIZE,
    }
}
