//! Tool path generator registry
//!
//! Keeps the generators a host knows about, keyed by their id. Registration
//! builds the generator's schema up front and checks that every declared
//! action can be run, so a broken generator is rejected before an operator
//! can select it.

use crate::plugin::{check_action_coverage, Tpg, TpgDescriptor};
use crate::second_tpg::SecondTpg;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tpgkit_core::Result;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Default)]
pub struct TpgRegistry {
    tpgs: RwLock<HashMap<Uuid, Arc<dyn Tpg>>>,
}

impl TpgRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the generators shipped with this crate
    pub fn with_builtin() -> Result<Self> {
        let registry = Self::new();
        registry.register(Arc::new(SecondTpg::new()))?;
        Ok(registry)
    }

    /// Add a generator.
    ///
    /// Returns `Ok(false)` when another generator already uses the same id;
    /// the earlier registration is kept.
    pub fn register(&self, tpg: Arc<dyn Tpg>) -> Result<bool> {
        let descriptor = *tpg.describe();
        check_action_coverage(tpg.as_ref())?;

        let mut tpgs = self.tpgs.write();
        if let Some(existing) = tpgs.get(&descriptor.id) {
            warn!(
                "TPG id {} of '{}' collides with '{}'; keeping the existing one",
                descriptor.id,
                descriptor.name,
                existing.describe().name
            );
            return Ok(false);
        }
        if let Some(namesake) = tpgs
            .values()
            .find(|t| t.describe().name.eq_ignore_ascii_case(descriptor.name))
        {
            warn!(
                "TPG '{}' ({}) shares its name with {}; lookups by name pick the first one listed",
                descriptor.name,
                descriptor.id,
                namesake.describe().id
            );
        }
        tpgs.insert(descriptor.id, tpg);
        info!("Registered TPG '{}' ({})", descriptor.name, descriptor.id);
        Ok(true)
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<dyn Tpg>> {
        self.tpgs.read().get(id).cloned()
    }

    /// Find by name, ignoring case
    ///
    /// When several generators share a name the one listed first by
    /// [`descriptors`](Self::descriptors) wins.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<dyn Tpg>> {
        self.tpgs
            .read()
            .values()
            .filter(|t| t.describe().name.eq_ignore_ascii_case(name))
            .min_by(|a, b| {
                let (a, b) = (a.describe(), b.describe());
                a.name.cmp(b.name).then(a.id.cmp(&b.id))
            })
            .cloned()
    }

    /// Look up by id if `key` parses as a UUID, otherwise by name
    pub fn resolve(&self, key: &str) -> Option<Arc<dyn Tpg>> {
        match Uuid::parse_str(key) {
            Ok(id) => self.get(&id),
            Err(_) => self.find_by_name(key),
        }
    }

    /// Descriptors of every registered generator, sorted by name
    pub fn descriptors(&self) -> Vec<TpgDescriptor> {
        let mut descriptors: Vec<TpgDescriptor> =
            self.tpgs.read().values().map(|t| *t.describe()).collect();
        descriptors.sort_by(|a, b| a.name.cmp(b.name).then(a.id.cmp(&b.id)));
        descriptors
    }

    pub fn len(&self) -> usize {
        self.tpgs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tpgs.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpgkit_core::{ToolpathSink, TpgError};
    use tpgkit_settings::{SettingsSchema, SettingsValues};

    /// Generator with no settings and no actions, identified by `descriptor`
    struct Blank {
        descriptor: TpgDescriptor,
        schema: SettingsSchema,
    }

    impl Blank {
        fn new(id: Uuid, name: &'static str) -> Self {
            Self {
                descriptor: TpgDescriptor {
                    id,
                    name,
                    description: "No actions",
                },
                schema: SettingsSchema::default(),
            }
        }
    }

    impl Tpg for Blank {
        fn describe(&self) -> &TpgDescriptor {
            &self.descriptor
        }

        fn describe_settings(&self) -> Result<&SettingsSchema> {
            Ok(&self.schema)
        }

        fn supported_actions(&self) -> &[&'static str] {
            &[]
        }

        fn run(&self, _: &SettingsValues, _: &mut dyn ToolpathSink, action: &str) -> Result<()> {
            Err(TpgError::unknown_action(action))
        }
    }

    #[test]
    fn test_builtin() {
        let registry = TpgRegistry::with_builtin().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&SecondTpg::ID).is_some());
        assert!(registry.find_by_name("secondtpg").is_some());
        assert!(registry.resolve("299d8e22-3155-11e2-98ec-08002734b94f").is_some());
        assert!(registry.resolve("Pocket").is_none());
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let registry = TpgRegistry::new();
        let first: Arc<dyn Tpg> = Arc::new(SecondTpg::new());
        assert!(registry.register(first.clone()).unwrap());
        assert!(!registry.register(Arc::new(SecondTpg::new())).unwrap());
        assert_eq!(registry.len(), 1);
        let kept = registry.get(&SecondTpg::ID).unwrap();
        assert!(Arc::ptr_eq(&kept, &first));
    }

    #[test]
    fn test_shared_name_resolves_to_lowest_id() {
        let low = uuid::uuid!("00000000-0000-4000-8000-000000000001");
        let high = uuid::uuid!("ffffffff-0000-4000-8000-000000000001");

        for order in [[high, low], [low, high]] {
            let registry = TpgRegistry::new();
            for id in order {
                assert!(registry.register(Arc::new(Blank::new(id, "Facing"))).unwrap());
            }
            assert_eq!(registry.len(), 2);
            for _ in 0..8 {
                let found = registry.find_by_name("facing").unwrap();
                assert_eq!(found.describe().id, low);
            }
            assert_eq!(registry.descriptors()[0].id, low);
            assert_eq!(registry.resolve("Facing").unwrap().describe().id, low);
        }
    }
}
