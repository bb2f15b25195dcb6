//! Template rendering for administration views.
//!
//! Views do not render HTML themselves: their GET handlers return a
//! [`TemplateResponse`] (template name plus context), and the dispatcher
//! hands it to the configured [`Renderer`]. [`TeraRenderer`] is the default
//! implementation and ships the built-in `repo_admin/*.html` templates.

use std::collections::HashMap;
use std::error::Error as _;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use repo_admin_core::settings::DEFAULT_BASE_TEMPLATE;
use repo_admin_core::{AdminError, AdminResult, Settings};
use serde::Serialize;
use tera::Tera;
use tracing::debug;

/// Generic landing template used by views that do not set their own.
pub const INDEX_TEMPLATE: &str = "repo_admin/index.html";
/// Template used by resource detail views.
pub const DETAILS_TEMPLATE: &str = "repo_admin/details.html";
/// Template used by resource list views.
pub const SEARCH_TEMPLATE: &str = "repo_admin/search.html";

/// Context key naming the base template pages extend.
pub const BASE_TEMPLATE_KEY: &str = "admin_base_template";

const BUILTIN_PAGES: [&str; 3] = [INDEX_TEMPLATE, DETAILS_TEMPLATE, SEARCH_TEMPLATE];

const BUILTIN_TEMPLATES: [(&str, &str); 4] = [
    (
        DEFAULT_BASE_TEMPLATE,
        include_str!("../templates/repo_admin/base.html"),
    ),
    (INDEX_TEMPLATE, include_str!("../templates/repo_admin/index.html")),
    (
        DETAILS_TEMPLATE,
        include_str!("../templates/repo_admin/details.html"),
    ),
    (
        SEARCH_TEMPLATE,
        include_str!("../templates/repo_admin/search.html"),
    ),
];

/// A template name and the context it should be rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateResponse {
    /// The template to render.
    pub template: String,
    /// Context variables.
    pub context: serde_json::Map<String, serde_json::Value>,
}

impl TemplateResponse {
    /// Creates a response with an empty context.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            context: serde_json::Map::new(),
        }
    }

    /// Adds a context variable.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the value cannot be serialized.
    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> AdminResult<Self> {
        self.context
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Returns a context variable.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.context.get(key)
    }
}

/// Renders a [`TemplateResponse`] to a string.
pub trait Renderer: Send + Sync {
    /// Renders the response's template with its context.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if the template is missing or fails to render.
    fn render(&self, response: &TemplateResponse) -> AdminResult<String>;
}

/// A [`Renderer`] backed by Tera.
///
/// Templates from the host's template directories take precedence over the
/// built-in ones, so hosts can override any `repo_admin/*.html` page.
///
/// Built-in pages extend the base template named by the
/// `admin_base_template` context value. Pages a host overrides are rendered
/// as written.
///
/// # Examples
///
/// ```
/// use repo_admin_panel::render::{Renderer, TemplateResponse, TeraRenderer};
///
/// let mut renderer = TeraRenderer::new().unwrap();
/// renderer.add_template("hello.html", "Hello {{ name }}!").unwrap();
/// let response = TemplateResponse::new("hello.html").with("name", "admin").unwrap();
/// assert_eq!(renderer.render(&response).unwrap(), "Hello admin!");
/// ```
#[derive(Debug)]
pub struct TeraRenderer {
    tera: Tera,
    builtin_pages: Vec<&'static str>,
    rebased: RwLock<HashMap<String, Arc<Tera>>>,
}

impl TeraRenderer {
    /// Creates a renderer with only the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if a built-in template fails to parse.
    pub fn new() -> AdminResult<Self> {
        Ok(Self::with_tera(builtin_tera()?, BUILTIN_PAGES.to_vec()))
    }

    fn with_tera(tera: Tera, builtin_pages: Vec<&'static str>) -> Self {
        Self {
            tera,
            builtin_pages,
            rebased: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a renderer loading `settings.template_dirs` on top of the
    /// built-in templates. Earlier directories win over later ones.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if a directory cannot be loaded.
    pub fn from_settings(settings: &Settings) -> AdminResult<Self> {
        let mut tera = Tera::default();
        for dir in &settings.template_dirs {
            let loaded = load_dir(dir)?;
            tera.extend(&loaded).map_err(template_error)?;
        }
        let builtin_pages: Vec<&'static str> = BUILTIN_PAGES
            .into_iter()
            .filter(|page| !tera.get_template_names().any(|n| n == *page))
            .collect();
        tera.extend(&builtin_tera()?).map_err(template_error)?;
        debug!(
            count = tera.get_template_names().count(),
            "loaded administration templates"
        );
        Ok(Self::with_tera(tera, builtin_pages))
    }

    /// Adds or replaces a template from a string.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if the template fails to parse.
    pub fn add_template(&mut self, name: &str, source: &str) -> AdminResult<()> {
        self.tera
            .add_raw_template(name, source)
            .map_err(template_error)?;
        self.builtin_pages.retain(|page| *page != name);
        self.rebased
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }

    /// Returns whether a template with `name` is loaded.
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Returns a Tera whose built-in pages extend `base`, building it on
    /// first use.
    fn rebased_tera(&self, base: &str) -> AdminResult<Arc<Tera>> {
        if let Some(tera) = self
            .rebased
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(base)
        {
            return Ok(Arc::clone(tera));
        }
        let mut tera = self.tera.clone();
        let default_extends = format!("{{% extends \"{DEFAULT_BASE_TEMPLATE}\" %}}");
        let extends = format!("{{% extends \"{base}\" %}}");
        let pages: Vec<(&str, String)> = BUILTIN_TEMPLATES
            .iter()
            .filter(|(name, _)| self.builtin_pages.contains(name))
            .map(|(name, source)| (*name, source.replacen(&default_extends, &extends, 1)))
            .collect();
        tera.add_raw_templates(pages).map_err(template_error)?;
        debug!(base, "built-in pages rebased");
        let tera = Arc::new(tera);
        self.rebased
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(base.to_string(), Arc::clone(&tera));
        Ok(tera)
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, response: &TemplateResponse) -> AdminResult<String> {
        let context = tera::Context::from_serialize(&response.context).map_err(template_error)?;
        let base = response
            .get(BASE_TEMPLATE_KEY)
            .and_then(serde_json::Value::as_str)
            .filter(|base| *base != DEFAULT_BASE_TEMPLATE);
        match base {
            Some(base) if self.builtin_pages.iter().any(|p| *p == response.template) => self
                .rebased_tera(base)?
                .render(&response.template, &context)
                .map_err(template_error),
            _ => self
                .tera
                .render(&response.template, &context)
                .map_err(template_error),
        }
    }
}

fn builtin_tera() -> AdminResult<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(BUILTIN_TEMPLATES.to_vec())
        .map_err(template_error)?;
    Ok(tera)
}

fn load_dir(dir: &Path) -> AdminResult<Tera> {
    let pattern = dir.join("**/*.html");
    let pattern = pattern.to_str().ok_or_else(|| {
        AdminError::TemplateError(format!("invalid template directory path: {}", dir.display()))
    })?;
    Tera::new(pattern).map_err(template_error)
}

/// Flattens a Tera error and its sources into a single message.
fn template_error(err: tera::Error) -> AdminError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    AdminError::TemplateError(message)
}
