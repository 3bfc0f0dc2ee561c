//! Build-once storage for a generator's settings schema.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use tpgkit_core::{ConfigurationError, Result};
use tpgkit_settings::SettingsSchema;
use tracing::debug;

/// Lifecycle of a [`SchemaCell`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    Uninitialized,
    Ready,
}

/// Holds a settings schema that is built on first access and then cached.
///
/// The builder runs under a lock, so concurrent first callers build it once.
/// A failed build is returned to the caller and not cached.
#[derive(Debug, Default)]
pub struct SchemaCell {
    schema: OnceLock<SettingsSchema>,
    build_lock: Mutex<()>,
    builds: AtomicUsize,
}

impl SchemaCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SchemaState {
        if self.schema.get().is_some() {
            SchemaState::Ready
        } else {
            SchemaState::Uninitialized
        }
    }

    /// Number of times the builder has been invoked
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Acquire)
    }

    /// The cached schema, building it with `build` if this is the first access
    pub fn get_or_build<F>(&self, build: F) -> Result<&SettingsSchema>
    where
        F: FnOnce() -> std::result::Result<SettingsSchema, ConfigurationError>,
    {
        if let Some(schema) = self.schema.get() {
            return Ok(schema);
        }

        let _guard = self.build_lock.lock();
        if let Some(schema) = self.schema.get() {
            return Ok(schema);
        }

        self.builds.fetch_add(1, Ordering::AcqRel);
        let schema = build()?;
        debug!("Settings schema built with {} action(s)", schema.len());
        Ok(self.schema.get_or_init(move || schema))
    }
}
