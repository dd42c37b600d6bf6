//! Engine registry mapping names to search parameters

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::engines;

/// Fallback engine, used whenever a lookup misses
pub const DEFAULT_ENGINE: &str = "bing";

/// Placeholder in a query template, replaced by the escaped query
const QUERY_SLOT: &str = "{}";

/// Parameters of one search engine
#[derive(Debug, Clone)]
pub struct EngineParam {
    /// Human-readable description for the catalogue
    pub description: String,
    /// Base URL of the engine
    pub domain: String,
    /// Path-and-query template with exactly one `{}` slot for the
    /// escaped query; empty means the engine only opens its home page
    pub query_template: String,
    /// Ajax endpoint for sites that render results client-side
    pub ajax_url: Option<String>,
    /// Cookie required by the site, when any
    pub cookie: Option<String>,
}

impl EngineParam {
    pub fn new(
        description: impl Into<String>,
        domain: impl Into<String>,
        query_template: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            domain: domain.into(),
            query_template: query_template.into(),
            ajax_url: None,
            cookie: None,
        }
    }

    pub fn ajax_url(mut self, url: impl Into<String>) -> Self {
        self.ajax_url = Some(url.into());
        self
    }

    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }
}

/// Registry of all known search engines
///
/// Built once at startup and read-only afterward. The fallback entry is
/// seeded at construction, so lookups are total: an unknown name resolves
/// to [`DEFAULT_ENGINE`] instead of failing. A typo in the engine name
/// should still produce a usable search, not abort the session.
pub struct EngineRegistry {
    /// Engines by name
    entries: HashMap<String, EngineParam>,
    /// Insertion order, which is also catalogue display order
    order: Vec<String>,
}

impl EngineRegistry {
    /// Create a registry holding only the fallback engine
    pub fn new() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
            order: Vec::new(),
        };
        registry.register(DEFAULT_ENGINE, engines::bing());
        registry
    }

    /// Create a registry with the full built-in engine table
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, param) in engines::builtin() {
            registry.register(name, param);
        }
        registry
    }

    /// Register an engine; re-registering a name replaces its parameters
    pub fn register(&mut self, name: impl Into<String>, param: EngineParam) {
        let name = name.into();
        if self.entries.insert(name.clone(), param).is_none() {
            self.order.push(name);
        }
    }

    /// Get the parameters for an engine, falling back to the default
    /// engine when the name is unknown
    pub fn lookup(&self, name: &str) -> &EngineParam {
        self.entries
            .get(name)
            .unwrap_or_else(|| &self.entries[DEFAULT_ENGINE])
    }

    /// Build the URL a browser should open for `query` on `engine`
    ///
    /// An empty query yields the engine home page. Otherwise the query is
    /// percent-encoded as a single query component and substituted into
    /// the engine's template after its domain.
    pub fn format_search_url(&self, engine: &str, query: &str) -> String {
        let param = self.lookup(engine);
        if query.is_empty() {
            return param.domain.clone();
        }
        let escaped = urlencoding::encode(query);
        format!(
            "{}{}",
            param.domain,
            param.query_template.replacen(QUERY_SLOT, &escaped, 1)
        )
    }

    /// Human-readable catalogue of the registered engines, one
    /// `name: description` line each, in insertion order
    pub fn describe_commands(&self) -> String {
        let mut lines = Vec::with_capacity(self.order.len() + 1);
        lines.push("打开默认浏览器, 指定搜索引擎, 检索相关query，模式如下：".to_string());
        for name in &self.order {
            if let Some(param) = self.entries.get(name) {
                lines.push(format!("{}: {}", name, param.description));
            }
        }
        lines.join("\n")
    }

    /// Check if an engine is registered under this exact name
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered engine names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Number of registered engines
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Process-wide registry, built on first use and shared read-only
pub fn default_registry() -> &'static EngineRegistry {
    static REGISTRY: Lazy<EngineRegistry> = Lazy::new(EngineRegistry::with_defaults);
    &REGISTRY
}
