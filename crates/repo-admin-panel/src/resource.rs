//! The resource contract administration views render UI for.
//!
//! Resources are owned by the service layer. The administration holds a
//! shared reference, never mutates it, and only asks for the schema, the
//! service-level search configuration and the API blueprint name.

use crate::schema::Schema;
use crate::search::SearchOptions;

/// A data-access/service object (CRUD + search over a domain entity).
///
/// # Examples
///
/// ```
/// use repo_admin_panel::resource::Resource;
/// use repo_admin_panel::schema::{FieldSchema, FieldType, Schema};
/// use repo_admin_panel::search::SearchOptions;
///
/// struct Records;
///
/// impl Resource for Records {
///     fn blueprint_name(&self) -> &str { "records" }
///     fn schema(&self) -> Schema {
///         Schema::new(vec![FieldSchema::new("id", FieldType::String)])
///     }
///     fn search_options(&self) -> SearchOptions { SearchOptions::default() }
/// }
/// ```
pub trait Resource: Send + Sync {
    /// Name of the API blueprint serving this resource (e.g. `"records"`).
    ///
    /// The search endpoint is declared under `"<blueprint_name>.search"`.
    fn blueprint_name(&self) -> &str;

    /// The schema of the resource's records.
    fn schema(&self) -> Schema;

    /// Service-level facets and sort options.
    fn search_options(&self) -> SearchOptions;
}
