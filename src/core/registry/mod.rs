//! Adapter registry
//!
//! Holds the descriptor of every backend adapter. Registration happens during
//! startup only; once the registry is closed the descriptor list is frozen and
//! readers take a lock-free snapshot.

use crate::core::types::AdapterDescriptor;
use crate::utils::error::{CoordinatorError, Result};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};


/// Check that exactly one adapter is the terminal fallback and that it sorts last
///
/// The fallback's priority must be strictly greater than every other
/// adapter's, so it is never tried ahead of a specific adapter.
pub fn check_fallback_invariant<'a, I>(adapters: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = &'a AdapterDescriptor>,
{
    let mut fallback: Option<&AdapterDescriptor> = None;
    let mut max_other: Option<u32> = None;

    for adapter in adapters {
        if adapter.is_fallback {
            if let Some(existing) = fallback {
                return Err(format!(
                    "Only one fallback adapter is allowed, found {} and {}",
                    existing.id, adapter.id
                ));
            }
            fallback = Some(adapter);
        } else {
            max_other = Some(max_other.map_or(adapter.priority, |m| m.max(adapter.priority)));
        }
    }

    let fallback = fallback.ok_or_else(|| "No fallback adapter configured".to_string())?;

    if let Some(max_other) = max_other {
        if fallback.priority <= max_other {
            return Err(format!(
                "Fallback adapter {} must have the lowest priority (value {} must exceed {})",
                fallback.id, fallback.priority, max_other
            ));
        }
    }

    Ok(())
}

/// Registry of adapter descriptors
pub struct AdapterRegistry {
    /// Descriptors in registration order
    adapters: ArcSwap<Vec<Arc<AdapterDescriptor>>>,
    /// Set once startup completed
    closed: AtomicBool,
    /// Serializes writers; readers never take it
    write_lock: Mutex<()>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl AdapterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            adapters: ArcSwap::from_pointee(Vec::new()),
            closed: AtomicBool::new(false),
            write_lock: Mutex::new(()),
        }
    }

    /// Register an adapter descriptor
    pub fn register(&self, descriptor: AdapterDescriptor) -> Result<()> {
        let descriptor = descriptor.normalized();
        let _guard = self.write_lock.lock();

        if self.is_closed() {
            return Err(CoordinatorError::RegistryClosed(descriptor.id));
        }

        let current = self.adapters.load();
        if current.iter().any(|a| a.id == descriptor.id) {
            return Err(CoordinatorError::DuplicateAdapter(descriptor.id));
        }

        debug!(
            "Registering adapter {} (priority {}, fallback {})",
            descriptor.id, descriptor.priority, descriptor.is_fallback
        );

        let mut next = current.as_ref().clone();
        next.push(Arc::new(descriptor));
        self.adapters.store(Arc::new(next));
        Ok(())
    }

    /// Look up an adapter by id
    pub fn lookup(&self, id: &str) -> Result<Arc<AdapterDescriptor>> {
        self.adapters
            .load()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| CoordinatorError::not_found(id))
    }

    /// Whether an adapter id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.adapters.load().iter().any(|a| a.id == id)
    }

    /// All adapters in registration order
    pub fn list(&self) -> Vec<Arc<AdapterDescriptor>> {
        self.adapters.load().as_ref().clone()
    }

    /// All adapters sorted by priority ascending
    ///
    /// The sort is stable, so equal priorities keep registration order.
    pub fn list_by_priority(&self) -> Vec<Arc<AdapterDescriptor>> {
        let mut adapters = self.list();
        adapters.sort_by_key(|a| a.priority);
        adapters
    }

    /// Adapters declaring `tag`, sorted by priority ascending
    pub fn list_by_capability(&self, tag: &str) -> Vec<Arc<AdapterDescriptor>> {
        let mut adapters: Vec<_> = self
            .adapters
            .load()
            .iter()
            .filter(|a| a.has_capability(tag))
            .cloned()
            .collect();
        adapters.sort_by_key(|a| a.priority);
        adapters
    }

    /// The terminal fallback adapter
    pub fn default_fallback(&self) -> Result<Arc<AdapterDescriptor>> {
        self.adapters
            .load()
            .iter()
            .find(|a| a.is_fallback)
            .cloned()
            .ok_or_else(|| CoordinatorError::configuration("No fallback adapter configured"))
    }

    /// Check the fallback invariant over the current contents
    pub fn validate(&self) -> Result<()> {
        let adapters = self.adapters.load();
        check_fallback_invariant(adapters.iter().map(|a| a.as_ref()))
            .map_err(CoordinatorError::Configuration)
    }

    /// Validate and freeze the registry
    ///
    /// Further `register` calls fail with `RegistryClosed`. Closing twice is a
    /// no-op.
    pub fn close(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        if self.is_closed() {
            return Ok(());
        }

        self.validate()?;
        self.closed.store(true, Ordering::Release);
        info!("Adapter registry closed with {} adapters", self.len());
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.adapters.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
