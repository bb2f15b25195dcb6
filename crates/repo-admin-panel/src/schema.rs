//! Resource schemas and their JSON serialization.
//!
//! A [`Schema`] describes the fields of a resource's records. The service
//! layer owns it; the administration only reads it to auto-generate list
//! columns and detail pages, and serializes it with [`jsonify_schema`] for
//! the frontend templates.

use serde::{Deserialize, Serialize};

/// The type of a schema field.
///
/// Nested and list types carry their inner description so the serialized
/// schema can be walked recursively by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    /// A text value.
    String,
    /// An integer value.
    Integer,
    /// A floating point value.
    Float,
    /// A boolean value.
    Boolean,
    /// A date value.
    Date,
    /// A date and time value.
    Datetime,
    /// A nested object with its own schema.
    Object {
        /// Fields of the nested object.
        properties: Schema,
    },
    /// A list of values of the inner type.
    Array {
        /// The type of each list item.
        items: Box<FieldType>,
    },
}

impl FieldType {
    /// Returns the short type name used in the serialized schema.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "bool",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Object { .. } => "object",
            Self::Array { .. } => "array",
        }
    }
}

/// Schema information about a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// The field name.
    pub name: String,
    /// The field type.
    pub field_type: FieldType,
    /// Whether the field is required on input.
    pub required: bool,
    /// Whether the field is only ever produced by the service (dump-only).
    pub read_only: bool,
    /// Whether the field may be written but is never returned (load-only).
    pub write_only: bool,
    /// Human-readable title.
    pub title: String,
}

impl FieldSchema {
    /// Creates a new, optional, read-write field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        let title = name.replace('_', " ");
        Self {
            name,
            field_type,
            required: false,
            read_only: false,
            write_only: false,
            title,
        }
    }

    /// Marks this field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks this field as read-only.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Marks this field as write-only.
    #[must_use]
    pub const fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }

    /// Sets the human-readable title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// An ordered set of field descriptions.
///
/// # Examples
///
/// ```
/// use repo_admin_panel::schema::{FieldSchema, FieldType, Schema};
///
/// let schema = Schema::new(vec![
///     FieldSchema::new("id", FieldType::String).read_only(),
///     FieldSchema::new("title", FieldType::String).required(),
/// ]);
/// assert_eq!(schema.field_names(), vec!["id", "title"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The fields, in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl Schema {
    /// Creates a schema from a list of fields.
    pub const fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Returns the field with the given name, if any.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Serializes a schema into the JSON structure consumed by the templates.
///
/// Produces an object keyed by field name. Each entry holds `type`,
/// `required`, `read_only`, `write_only`, `title`, plus `properties` for
/// nested objects and `items` for lists. Field order is preserved.
///
/// # Examples
///
/// ```
/// use repo_admin_panel::schema::{jsonify_schema, FieldSchema, FieldType, Schema};
///
/// let schema = Schema::new(vec![FieldSchema::new("title", FieldType::String).required()]);
/// let json = jsonify_schema(&schema);
/// assert_eq!(json["title"]["type"], "string");
/// assert_eq!(json["title"]["required"], true);
/// ```
pub fn jsonify_schema(schema: &Schema) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for field in &schema.fields {
        let mut entry = jsonify_type(&field.field_type);
        if let serde_json::Value::Object(obj) = &mut entry {
            obj.insert("required".into(), field.required.into());
            obj.insert("read_only".into(), field.read_only.into());
            obj.insert("write_only".into(), field.write_only.into());
            obj.insert("title".into(), field.title.clone().into());
        }
        map.insert(field.name.clone(), entry);
    }
    serde_json::Value::Object(map)
}

fn jsonify_type(field_type: &FieldType) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    obj.insert("type".into(), field_type.type_name().into());
    match field_type {
        FieldType::Object { properties } => {
            obj.insert("properties".into(), jsonify_schema(properties));
        }
        FieldType::Array { items } => {
            obj.insert("items".into(), jsonify_type(items));
        }
        _ => {}
    }
    serde_json::Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_schema() -> Schema {
        Schema::new(vec![
            FieldSchema::new("id", FieldType::String).read_only(),
            FieldSchema::new("created", FieldType::Datetime).read_only(),
            FieldSchema::new("access_token", FieldType::String).write_only(),
            FieldSchema::new(
                "metadata",
                FieldType::Object {
                    properties: Schema::new(vec![
                        FieldSchema::new("title", FieldType::String).required(),
                        FieldSchema::new(
                            "keywords",
                            FieldType::Array {
                                items: Box::new(FieldType::String),
                            },
                        ),
                    ]),
                },
            ),
        ])
    }

    #[test]
    fn test_field_schema_defaults() {
        let f = FieldSchema::new("publication_date", FieldType::Date);
        assert!(!f.required);
        assert!(!f.read_only);
        assert_eq!(f.title, "publication date");
    }

    #[test]
    fn test_schema_lookup() {
        let schema = record_schema();
        assert!(schema.field("metadata").is_some());
        assert!(schema.field("missing").is_none());
        assert_eq!(
            schema.field_names(),
            vec!["id", "created", "access_token", "metadata"]
        );
        assert!(!schema.is_empty());
        assert!(Schema::default().is_empty());
    }

    #[test]
    fn test_jsonify_flat_fields() {
        let json = jsonify_schema(&record_schema());
        assert_eq!(json["id"]["type"], "string");
        assert_eq!(json["id"]["read_only"], true);
        assert_eq!(json["created"]["type"], "datetime");
        assert_eq!(json["access_token"]["write_only"], true);
    }

    #[test]
    fn test_jsonify_nested_fields() {
        let json = jsonify_schema(&record_schema());
        let metadata = &json["metadata"];
        assert_eq!(metadata["type"], "object");
        assert_eq!(metadata["properties"]["title"]["required"], true);
        assert_eq!(metadata["properties"]["keywords"]["type"], "array");
        assert_eq!(metadata["properties"]["keywords"]["items"]["type"], "string");
    }

    #[test]
    fn test_jsonify_preserves_field_order() {
        let json = jsonify_schema(&record_schema());
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["id", "created", "access_token", "metadata"]);
    }
}
