//! Navigation menu registry.
//!
//! [`AdminMenu`] accumulates one [`MenuEntry`] per registered view while the
//! administration is being built. On the first incoming request the
//! [`MenuInitHook`] flushes those entries into the host's global
//! [`NavigationMenu`], exactly once per process.

use std::collections::HashMap;
use std::sync::{Arc, Once, PoisonError, RwLock};

use tracing::{debug, info};

use crate::views::BaseView;

/// Root key under which administration entries are attached to the host menu.
pub const ADMIN_MENU_KEY: &str = "admin_navigation";

/// A navigation link for one administration view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Link text (the view's name).
    pub label: String,
    /// Endpoint location name, e.g. `administration.records`.
    pub endpoint: String,
    /// Optional grouping.
    pub category: Option<String>,
    /// Insertion position.
    pub order: usize,
}

/// Menu entries collected from registered views, in registration order.
///
/// There is no removal and no duplicate detection: adding the same view
/// twice yields two entries.
#[derive(Debug, Clone, Default)]
pub struct AdminMenu {
    entries: Vec<MenuEntry>,
}

impl AdminMenu {
    /// Creates an empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry for `view`, keyed by its endpoint location name.
    pub fn add_view_to_menu(&mut self, view: &BaseView) {
        let entry = MenuEntry {
            label: view.name().to_string(),
            endpoint: view.endpoint_location_name(),
            category: view.category().map(String::from),
            order: self.entries.len(),
        };
        debug!(endpoint = %entry.endpoint, category = ?entry.category, "menu entry added");
        self.entries.push(entry);
    }

    /// Returns all entries in insertion order.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Returns entries whose endpoint equals `endpoint`.
    pub fn entries_for(&self, endpoint: &str) -> Vec<&MenuEntry> {
        self.entries
            .iter()
            .filter(|e| e.endpoint == endpoint)
            .collect()
    }

    /// Groups entries by category. Uncategorized entries are under `None`.
    pub fn categories(&self) -> HashMap<Option<&str>, Vec<&MenuEntry>> {
        let mut groups: HashMap<Option<&str>, Vec<&MenuEntry>> = HashMap::new();
        for entry in &self.entries {
            groups
                .entry(entry.category.as_deref())
                .or_default()
                .push(entry);
        }
        groups
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entry was added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attaches every entry to `menu_root` under `key`.
    ///
    /// Uncategorized entries land at `<key>.<label>`; categorized entries at
    /// `<key>.<category>.<label>`, with the category registered as a
    /// text-only node `<key>.<category>`.
    pub fn register_menu_entries(&self, menu_root: &NavigationMenu, key: &str) {
        for entry in &self.entries {
            let path = match &entry.category {
                Some(category) => {
                    let category_path = format!("{key}.{category}");
                    if menu_root.get(&category_path).is_none() {
                        menu_root.register(&category_path, category, None, entry.order);
                    }
                    format!("{category_path}.{}", entry.label)
                }
                None => format!("{key}.{}", entry.label),
            };
            menu_root.register(&path, &entry.label, Some(&entry.endpoint), entry.order);
        }
    }
}

/// A node of the host's hierarchical navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Dotted path, e.g. `admin_navigation.records`.
    pub path: String,
    /// Link text.
    pub text: String,
    /// Endpoint the link points to; `None` for grouping nodes.
    pub endpoint: Option<String>,
    /// Position among siblings.
    pub order: usize,
}

/// The host's global navigation menu, addressed by dotted paths.
#[derive(Debug, Default)]
pub struct NavigationMenu {
    items: RwLock<Vec<MenuItem>>,
}

impl NavigationMenu {
    /// Creates an empty navigation menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the node at `path`, replacing an existing node.
    pub fn register(&self, path: &str, text: &str, endpoint: Option<&str>, order: usize) {
        let item = MenuItem {
            path: path.to_string(),
            text: text.to_string(),
            endpoint: endpoint.map(String::from),
            order,
        };
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = items.iter_mut().find(|i| i.path == path) {
            *existing = item;
        } else {
            items.push(item);
        }
    }

    /// Returns the node at `path`.
    pub fn get(&self, path: &str) -> Option<MenuItem> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|i| i.path == path)
            .cloned()
    }

    /// Returns the direct children of `path`, sorted by order.
    pub fn children(&self, path: &str) -> Vec<MenuItem> {
        let prefix = format!("{path}.");
        let mut children: Vec<MenuItem> = self
            .items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|i| {
                i.path
                    .strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.contains('.'))
            })
            .cloned()
            .collect();
        children.sort_by_key(|i| i.order);
        children
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if the menu has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flushes an [`AdminMenu`] into a [`NavigationMenu`] exactly once.
///
/// The administration router calls [`trigger`](Self::trigger) on every
/// request; only the first call does any work, even when several first
/// requests arrive concurrently.
#[derive(Debug)]
pub struct MenuInitHook {
    once: Once,
    menu: AdminMenu,
    navigation: Arc<NavigationMenu>,
    key: String,
}

impl MenuInitHook {
    /// Creates a hook flushing `menu` into `navigation` under `key`.
    pub fn new(menu: AdminMenu, navigation: Arc<NavigationMenu>, key: &str) -> Self {
        Self {
            once: Once::new(),
            menu,
            navigation,
            key: key.to_string(),
        }
    }

    /// Runs the flush if it has not run yet.
    ///
    /// Returns `true` only for the call that performed the flush.
    pub fn trigger(&self) -> bool {
        let mut ran = false;
        self.once.call_once(|| {
            self.menu.register_menu_entries(&self.navigation, &self.key);
            info!(
                entries = self.menu.len(),
                key = %self.key,
                "administration menu registered"
            );
            ran = true;
        });
        ran
    }

    /// Returns whether the flush has completed.
    pub fn has_run(&self) -> bool {
        self.once.is_completed()
    }

    /// Returns the menu this hook flushes.
    pub const fn menu(&self) -> &AdminMenu {
        &self.menu
    }

    /// Returns the menu for adding entries before the flush.
    pub fn menu_mut(&mut self) -> &mut AdminMenu {
        &mut self.menu
    }
}
