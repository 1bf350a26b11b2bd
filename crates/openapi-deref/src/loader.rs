//! The injected capability for fetching external documents.

use async_trait::async_trait;
use openapi_types::Components;
use tokio::sync::Semaphore;

/// Boxed error type loaders return; the engine wraps it with the locator
/// that failed.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The components loaded from one external document, plus any advisory
/// messages the loader wants surfaced to the caller.
#[derive(Debug, Clone, Default)]
pub struct LoadedComponents {
    /// The registry parsed out of the external document.
    pub components: Components,
    /// Advisory messages, such as deprecation warnings, produced while
    /// loading.
    pub warnings: Vec<String>,
}

impl LoadedComponents {
    /// Wrap a registry with no warnings.
    pub fn new(components: Components) -> Self {
        Self {
            components,
            warnings: Vec::new(),
        }
    }
}

/// Fetches and parses an external document into a component registry.
///
/// Supplied by the embedding application: an HTTP fetch plus parse, a
/// filesystem read plus parse, or anything else that turns a locator string
/// into components. The engine is agnostic to transport and document format.
/// Timeouts and retries are the loader's own responsibility; the engine
/// treats any failure as terminal for the subtree that referenced the
/// document.
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    /// Load the document named by `locator`.
    async fn load(&self, locator: &str) -> Result<LoadedComponents, BoxError>;
}

/// A loader decorator bounding how many loads run concurrently.
///
/// A document can fan out across thousands of external references at once;
/// wrapping the real loader caps the number of in-flight fetches without the
/// engine itself scheduling anything.
pub struct ThrottledLoader<L> {
    inner: L,
    permits: Semaphore,
}

impl<L> ThrottledLoader<L> {
    /// Wrap a loader, allowing at most `limit` concurrent loads.
    pub fn new(inner: L, limit: usize) -> Self {
        Self {
            inner,
            permits: Semaphore::new(limit),
        }
    }
}

#[async_trait]
impl<L: ComponentLoader> ComponentLoader for ThrottledLoader<L> {
    async fn load(&self, locator: &str) -> Result<LoadedComponents, BoxError> {
        let _permit = self.permits.acquire().await?;
        self.inner.load(locator).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLoader {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl ComponentLoader for CountingLoader {
        async fn load(&self, _locator: &str) -> Result<LoadedComponents, BoxError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(current, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(LoadedComponents::default())
        }
    }

    #[tokio::test]
    async fn test_throttled_loader_caps_concurrency() {
        let loader = ThrottledLoader::new(
            CountingLoader {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            },
            3,
        );

        let loads = (0..20).map(|i| {
            let loader = &loader;
            async move { loader.load(&format!("doc-{i}.yaml")).await }
        });
        futures::future::try_join_all(loads).await.unwrap();

        assert!(loader.inner.peak.load(Ordering::SeqCst) <= 3);
    }
}
