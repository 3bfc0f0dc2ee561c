//! Example tool path generator.
//!
//! Exists to exercise the generator interface end to end: two text settings
//! under a `default` action, a fixed unit-square toolpath, and a diagnostic
//! `test` action.

use crate::plugin::{Tpg, TpgDescriptor};
use crate::schema_cell::{SchemaCell, SchemaState};
use tpgkit_core::{ConfigurationError, Result, ToolpathSink, TpgError};
use tpgkit_settings::{Definition, SettingsSchema, SettingsValues};
use tracing::{debug, info};
use uuid::{uuid, Uuid};

/// Height of rapid moves above the stock (mm)
const SAFE_Z: f64 = 0.1;
/// Cutting depth (mm)
const CUT_Z: f64 = -0.5;

static DESCRIPTOR: TpgDescriptor = TpgDescriptor {
    id: SecondTpg::ID,
    name: "SecondTpg",
    description: "A second TPG for testing UI",
};

/// Actions [`SecondTpg::run`] can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondTpgAction {
    /// Cut a unit square at fixed depth
    Default,
    /// Log a diagnostic message; not listed in the schema
    Test,
}

impl SecondTpgAction {
    pub const ALL: [SecondTpgAction; 2] = [Self::Default, Self::Test];
    const NAMES: [&'static str; 2] = ["default", "test"];

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Test => "test",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// A generator that ignores its settings and emits a unit square.
#[derive(Debug, Default)]
pub struct SecondTpg {
    schema: SchemaCell,
}

impl SecondTpg {
    pub const ID: Uuid = uuid!("299d8e22-3155-11e2-98ec-08002734b94f");

    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema_state(&self) -> SchemaState {
        self.schema.state()
    }

    /// How many times the schema builder has run
    pub fn schema_build_count(&self) -> usize {
        self.schema.build_count()
    }

    fn define_settings() -> std::result::Result<SettingsSchema, ConfigurationError> {
        SettingsSchema::builder()
            .add_widget(
                "default",
                Definition::new(
                    "geometry",
                    "Geometry",
                    "Cam::Textbox",
                    "1",
                    "mm",
                    "How close to run tool to final depth",
                ),
            )?
            .add_widget(
                "default",
                Definition::new(
                    "tolerance",
                    "Tolerance",
                    "Cam::Textbox",
                    "1",
                    "mm",
                    "How close to run tool to final depth",
                ),
            )?
            .build()
    }

    fn cut_unit_square(sink: &mut dyn ToolpathSink) {
        sink.rapid(0.0, 0.0, SAFE_Z);
        sink.feed(0.0, 0.0, CUT_Z);
        sink.feed(1.0, 0.0, CUT_Z);
        sink.feed(1.0, 1.0, CUT_Z);
        sink.feed(0.0, 1.0, CUT_Z);
        sink.feed(0.0, 0.0, CUT_Z);
        sink.rapid(0.0, 0.0, SAFE_Z);
    }
}

impl Tpg for SecondTpg {
    fn describe(&self) -> &TpgDescriptor {
        &DESCRIPTOR
    }

    fn describe_settings(&self) -> Result<&SettingsSchema> {
        self.schema.get_or_build(Self::define_settings)
    }

    fn supported_actions(&self) -> &[&'static str] {
        &SecondTpgAction::NAMES
    }

    fn run(
        &self,
        settings: &SettingsValues,
        sink: &mut dyn ToolpathSink,
        action: &str,
    ) -> Result<()> {
        let action = SecondTpgAction::from_name(action)
            .ok_or_else(|| TpgError::unknown_action(action))?;

        match action {
            SecondTpgAction::Default => {
                // values are not consumed, but they must still belong to this generator
                settings.validate_values(self.describe_settings()?)?;
                Self::cut_unit_square(sink);
                debug!("{}: appended unit square", DESCRIPTOR.name);
            }
            SecondTpgAction::Test => {
                info!("Testing ExampleTPG");
            }
        }
        Ok(())
    }
}
