//! Search page listing the items of a resource.
//!
//! The page itself is a shell: the frontend search application queries the
//! resource's search API directly. The view's job is to assemble the
//! [`SearchAppConfig`] that application starts from.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use repo_admin_core::{AdminError, AdminResult, Settings};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::resource::ResourceView;
use super::{AdminContext, AdminView, BaseView, ResourceOptions, ViewRequest};
use crate::app::HostApp;
use crate::render::{TemplateResponse, SEARCH_TEMPLATE};
use crate::schema::jsonify_schema;
use crate::search::{search_app_config, FacetOption, SearchAppConfig, SortOption};

/// Media type requested from the search API by default.
pub const DEFAULT_SEARCH_ACCEPT: &str = "application/vnd.repo-admin.v1+json";

/// A column of the result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// The schema field shown.
    pub field: String,
    /// Column header.
    pub label: String,
}

impl Column {
    /// Creates a column.
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }
}

/// Search-specific configuration of a list view.
///
/// Facets and sort options declared here win. When none are declared, the
/// named configuration value is used, and failing that the resource's own
/// search options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Search application id; defaults to `<NAME>_SEARCH`.
    pub search_config_name: Option<String>,
    /// Configuration key holding the facets.
    pub search_facets_config_name: Option<String>,
    /// Configuration key holding the sort options.
    pub search_sort_config_name: Option<String>,
    /// Declared sort options.
    pub sort_options: Vec<SortOption>,
    /// Declared facets.
    pub available_facets: Vec<FacetOption>,
    /// Explicit columns.
    pub columns: Option<Vec<Column>>,
    /// Schema fields left out of the default columns.
    pub column_exclude_list: Vec<String>,
    /// Explicit search API endpoint.
    pub search_api_endpoint: Option<String>,
    /// Headers sent to the search API.
    pub search_request_headers: Option<BTreeMap<String, String>>,
}

impl ListOptions {
    /// Creates empty list options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search application id.
    #[must_use]
    pub fn search_config_name(mut self, name: impl Into<String>) -> Self {
        self.search_config_name = Some(name.into());
        self
    }

    /// Sets the configuration key for facets.
    #[must_use]
    pub fn search_facets_config_name(mut self, name: impl Into<String>) -> Self {
        self.search_facets_config_name = Some(name.into());
        self
    }

    /// Sets the configuration key for sort options.
    #[must_use]
    pub fn search_sort_config_name(mut self, name: impl Into<String>) -> Self {
        self.search_sort_config_name = Some(name.into());
        self
    }

    /// Declares the sort options.
    #[must_use]
    pub fn sort_options(mut self, sort_options: Vec<SortOption>) -> Self {
        self.sort_options = sort_options;
        self
    }

    /// Declares the facets.
    #[must_use]
    pub fn available_facets(mut self, facets: Vec<FacetOption>) -> Self {
        self.available_facets = facets;
        self
    }

    /// Sets explicit columns.
    #[must_use]
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Excludes fields from the default columns.
    #[must_use]
    pub fn column_exclude_list(mut self, fields: Vec<String>) -> Self {
        self.column_exclude_list = fields;
        self
    }

    /// Sets the search API endpoint.
    #[must_use]
    pub fn search_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.search_api_endpoint = Some(endpoint.into());
        self
    }

    /// Replaces the search request headers.
    #[must_use]
    pub fn search_request_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.search_request_headers = Some(headers);
        self
    }
}

/// Lists and searches the items of a resource.
#[derive(Debug, Clone)]
pub struct ResourceListView {
    resource: ResourceView,
    search_config_name: Option<String>,
    available_facets: Vec<FacetOption>,
    sort_options: Vec<SortOption>,
    columns: Option<Vec<Column>>,
    column_exclude_list: Vec<String>,
    search_api_endpoint: String,
    search_request_headers: BTreeMap<String, String>,
}

impl ResourceListView {
    /// Creates a list view with default search options.
    ///
    /// # Errors
    ///
    /// See [`with_list_options`](Self::with_list_options).
    pub fn new(
        options: ResourceOptions,
        admin: &Arc<AdminContext>,
        app: &HostApp,
    ) -> AdminResult<Self> {
        Self::with_list_options(options, ListOptions::default(), admin, app)
    }

    /// Creates a list view, binding its resource and resolving its search
    /// facets, sort options and API endpoint.
    ///
    /// # Errors
    ///
    /// - Resource binding errors.
    /// - `ImproperlyConfigured` if no search endpoint is declared for the
    ///   resource and none is set explicitly.
    /// - `ConfigurationError` if a named facet or sort configuration value
    ///   is malformed.
    pub fn with_list_options(
        mut options: ResourceOptions,
        list: ListOptions,
        admin: &Arc<AdminContext>,
        app: &HostApp,
    ) -> AdminResult<Self> {
        if options.view.template.is_none() {
            options.view.template = Some(SEARCH_TEMPLATE.to_string());
        }
        let resource = ResourceView::new::<Self>(options, admin, app)?;
        let settings = app.settings();
        let service_options = resource.binding().resource().search_options();

        let available_facets = resolve_search_option(
            list.available_facets,
            list.search_facets_config_name.as_deref(),
            settings,
            service_options.facets,
        )?;
        let sort_options = resolve_search_option(
            list.sort_options,
            list.search_sort_config_name.as_deref(),
            settings,
            service_options.sort_options,
        )?;
        let search_api_endpoint = match list.search_api_endpoint {
            Some(endpoint) => endpoint,
            None => resolve_api_endpoint(&resource, settings)?,
        };
        let search_request_headers = list.search_request_headers.unwrap_or_else(|| {
            BTreeMap::from([("Accept".to_string(), DEFAULT_SEARCH_ACCEPT.to_string())])
        });

        debug!(
            view = resource.base().name(),
            endpoint = %search_api_endpoint,
            facets = available_facets.len(),
            sort_options = sort_options.len(),
            "list view configured"
        );
        Ok(Self {
            resource,
            search_config_name: list.search_config_name,
            available_facets,
            sort_options,
            columns: list.columns,
            column_exclude_list: list.column_exclude_list,
            search_api_endpoint,
            search_request_headers,
        })
    }

    /// The shared resource view state.
    pub const fn resource(&self) -> &ResourceView {
        &self.resource
    }

    /// The search application id.
    pub fn get_search_app_name(&self) -> String {
        self.search_config_name
            .clone()
            .unwrap_or_else(|| format!("{}_SEARCH", self.resource.base().name().to_uppercase()))
    }

    /// The facets offered by the search page.
    pub fn get_available_facets(&self) -> &[FacetOption] {
        &self.available_facets
    }

    /// The sort options offered by the search page.
    pub fn get_sort_options(&self) -> &[SortOption] {
        &self.sort_options
    }

    /// Headers sent with search requests.
    pub const fn get_search_request_headers(&self) -> &BTreeMap<String, String> {
        &self.search_request_headers
    }

    /// The search API URL.
    pub fn get_search_api_endpoint(&self) -> &str {
        &self.search_api_endpoint
    }

    /// Builds the search application configuration.
    pub fn init_search_config(&self) -> SearchAppConfig {
        search_app_config(
            &self.get_search_app_name(),
            self.get_available_facets(),
            self.get_sort_options(),
            self.get_search_api_endpoint(),
            self.get_search_request_headers(),
        )
    }

    /// The columns of the result table.
    pub fn get_columns(&self) -> Vec<Column> {
        if let Some(columns) = &self.columns {
            return columns.clone();
        }
        self.resource
            .binding()
            .schema()
            .fields
            .iter()
            .filter(|f| !self.column_exclude_list.contains(&f.name))
            .map(|f| Column::new(&f.name, &f.title))
            .collect()
    }
}

#[async_trait]
impl AdminView for ResourceListView {
    fn base(&self) -> &BaseView {
        self.resource.base()
    }

    async fn get(&self, _request: ViewRequest) -> AdminResult<TemplateResponse> {
        let display = self.resource.display();
        self.resource.base().render(&json!({
            "name": self.resource.base().name(),
            "search_config": self.init_search_config(),
            "resource_schema": jsonify_schema(self.resource.binding().schema()),
            "columns": self.get_columns(),
            "display_create": display.create,
            "display_read": display.read,
            "display_edit": display.edit,
            "display_delete": display.delete,
            "actions": self.resource.serialize_actions(),
        }))
    }
}

fn resolve_search_option<T: DeserializeOwned>(
    declared: Vec<T>,
    config_name: Option<&str>,
    settings: &Settings,
    service: Vec<T>,
) -> AdminResult<Vec<T>> {
    if !declared.is_empty() {
        return Ok(declared);
    }
    let Some(name) = config_name else {
        return Ok(service);
    };
    match settings.config_value(name) {
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            AdminError::ConfigurationError(format!("Invalid search configuration '{name}': {e}"))
        }),
        None => Ok(service),
    }
}

fn resolve_api_endpoint(resource: &ResourceView, settings: &Settings) -> AdminResult<String> {
    let endpoint = format!("{}.search", resource.binding().resource().blueprint_name());
    let rule = settings.api_endpoint(&endpoint).ok_or_else(|| {
        AdminError::ImproperlyConfigured(format!(
            "No API endpoint '{endpoint}' declared for view {}",
            resource.base().name()
        ))
    })?;
    Ok(format!(
        "{}/{}",
        settings.api_prefix.trim_end_matches('/'),
        rule.trim_start_matches('/')
    ))
}
