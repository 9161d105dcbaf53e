//! Types shared between handlers and the parse engine.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Base trait of every handler output.
///
/// Implemented for any `'static + Debug + Send + Sync` type, so handler data
/// structs only need `#[derive(Debug)]`. Consumers recover the concrete type
/// by downcasting.
pub trait ManifestData: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + fmt::Debug + Send + Sync> ManifestData for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Downcast a borrowed handler output to its concrete type.
#[must_use]
pub fn downcast_data<T: Any>(data: &dyn ManifestData) -> Option<&T> {
    data.as_any().downcast_ref::<T>()
}

/// Outcome of a successful Validate call.
#[derive(Debug)]
pub enum Validation {
    /// The parsed data is valid as is.
    Accepted,
    /// The data is valid once replaced by this value (defaults injected,
    /// values normalized). The engine swaps the map entry.
    Replaced(Box<dyn ManifestData>),
}

impl Validation {
    /// Wrap an updated handler output.
    pub fn replaced(data: impl ManifestData) -> Self {
        Self::Replaced(Box::new(data))
    }
}

/// Handler outputs keyed by handler key.
#[derive(Debug, Clone, Default)]
pub struct ManifestDataMap {
    entries: HashMap<String, Arc<dyn ManifestData>>,
}

impl ManifestDataMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<dyn ManifestData>> {
        self.entries.get(key)
    }

    /// Borrow the entry for `key` as its concrete type.
    ///
    /// Returns `None` if the entry is absent or has a different type.
    #[must_use]
    pub fn get_as<T: Any>(&self, key: &str) -> Option<&T> {
        let data: &dyn ManifestData = self.entries.get(key)?.as_ref();
        downcast_data(data)
    }

    /// Shared handle to the entry for `key` as its concrete type.
    #[must_use]
    pub fn get_arc<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let data = Arc::clone(self.entries.get(key)?);
        ManifestData::into_any_arc(data).downcast::<T>().ok()
    }

    /// Mutable access to the entry for `key`.
    ///
    /// Returns `None` if the entry is absent, has a different type, or is
    /// currently shared with another holder.
    pub fn get_mut_as<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        let data = Arc::get_mut(self.entries.get_mut(key)?)?;
        data.as_any_mut().downcast_mut::<T>()
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        data: Arc<dyn ManifestData>,
    ) -> Option<Arc<dyn ManifestData>> {
        self.entries.insert(key.into(), data)
    }

    pub fn remove(&mut self, key: &str) -> Option<Arc<dyn ManifestData>> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
