//! Route list factories.

use crate::{
    PresenterDiscovery, RouteCache, RouteDefinition, RouteError, RouteResult, RouteTable,
};
use proteus_convert::to_snake_case;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Builds a complete route table.
pub trait RouteListFactory: Send + Sync + 'static {
    /// Builds the table. Pure apart from whatever discovery reads.
    fn create(&self) -> RouteResult<RouteTable>;
}

/// Generates one route per discovered presenter.
///
/// The URL pattern is `[<prefix>/][<module>/]<resource>` where the resource
/// segment is the snake_cased presenter name, so `UserGroupsPresenter`
/// under prefix `api` and module `v1` yields `api/v1/user_groups`.
pub struct PresenterRouteListFactory {
    discovery: Arc<dyn PresenterDiscovery>,
    module: Option<String>,
    prefix: Option<String>,
}

impl PresenterRouteListFactory {
    /// Creates a factory over the given discovery source.
    #[must_use]
    pub fn new(
        discovery: Arc<dyn PresenterDiscovery>,
        module: Option<String>,
        prefix: Option<String>,
    ) -> Self {
        Self {
            discovery,
            module,
            prefix,
        }
    }

    fn pattern_for(&self, presenter: &str) -> String {
        let mut segments = Vec::with_capacity(3);
        if let Some(prefix) = &self.prefix {
            segments.push(prefix.as_str());
        }
        if let Some(module) = &self.module {
            segments.push(module.as_str());
        }
        let resource = to_snake_case(presenter);
        segments.push(&resource);
        segments.join("/")
    }
}

impl RouteListFactory for PresenterRouteListFactory {
    fn create(&self) -> RouteResult<RouteTable> {
        let presenters = self.discovery.presenters()?;
        tracing::debug!(count = presenters.len(), "building route table");
        Ok(presenters
            .into_iter()
            .map(|presenter| {
                let pattern = self.pattern_for(&presenter);
                RouteDefinition {
                    pattern,
                    target: presenter,
                    module: self.module.clone(),
                    prefix: self.prefix.clone(),
                }
            })
            .collect())
    }
}

/// Caching decorator for a [`RouteListFactory`].
///
/// The cache key covers the discovery scope (presenter root or equivalent,
/// module, prefix) plus the discovery source's modification signature, so
/// any change to the presenter set produces a fresh key and the stale entry
/// is simply never read again.
pub struct CachedRouteListFactory {
    inner: Arc<dyn RouteListFactory>,
    discovery: Arc<dyn PresenterDiscovery>,
    cache: Arc<dyn RouteCache>,
    scope: String,
}

impl CachedRouteListFactory {
    /// Wraps a factory with a cache.
    ///
    /// `scope` identifies the discovery configuration (root, module and
    /// prefix) and distinguishes entries of independently configured
    /// factories sharing one cache.
    #[must_use]
    pub fn new(
        inner: Arc<dyn RouteListFactory>,
        discovery: Arc<dyn PresenterDiscovery>,
        cache: Arc<dyn RouteCache>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            discovery,
            cache,
            scope: scope.into(),
        }
    }

    fn cache_key(&self) -> RouteResult<String> {
        let signature = self.discovery.modification_signature()?;
        let mut hasher = Sha256::new();
        hasher.update(self.scope.as_bytes());
        hasher.update(b"\n");
        hasher.update(signature.as_bytes());
        Ok(format!("routes:{:x}", hasher.finalize()))
    }
}

impl RouteListFactory for CachedRouteListFactory {
    fn create(&self) -> RouteResult<RouteTable> {
        let key = self.cache_key()?;
        if let Some(serialized) = self.cache.get(&key)? {
            tracing::debug!(%key, "route table cache hit");
            return serde_json::from_str(&serialized)
                .map_err(|e| RouteError::Serialization(e.to_string()));
        }

        let table = self.inner.create()?;
        let serialized = serde_json::to_string(&table)
            .map_err(|e| RouteError::Serialization(e.to_string()))?;
        self.cache.put(&key, serialized)?;
        tracing::debug!(%key, routes = table.len(), "route table cached");
        Ok(table)
    }
}
