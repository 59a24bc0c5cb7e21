//! A running switchbox plugin.

use switchbox_core::{BlockStats, RoutingEngine, Sequence, SequenceBuffer};

use crate::builder::SwitchboxBuilder;
use crate::descriptor::{Descriptor, Variant};
use crate::host::HostFeatures;
use crate::Result;

/// One plugin instance: construct, `activate()`, then `run()` once per block.
/// Dropping it releases everything.
#[derive(Debug)]
pub struct Switchbox {
    variant: Option<Variant>,
    engine: RoutingEngine,
}

impl Switchbox {
    pub fn builder<'h>() -> SwitchboxBuilder<'h> {
        SwitchboxBuilder::default()
    }

    /// Instantiate a shipped plugin the way a host does, from its descriptor.
    pub fn instantiate(descriptor: &Descriptor, features: HostFeatures<'_>) -> Result<Self> {
        Self::builder()
            .variant(descriptor.variant)
            .features(features)
            .build()
    }

    pub(crate) fn from_parts(variant: Option<Variant>, engine: RoutingEngine) -> Self {
        Self { variant, engine }
    }

    /// Forget sounding notes and the previous route. The next block never
    /// sends cleanup.
    pub fn activate(&mut self) {
        self.engine.reset();
        tracing::debug!(variant = ?self.variant, "switchbox activated");
    }

    /// Process one block. `inputs` and `outputs` are in port order.
    #[inline]
    pub fn run(
        &mut self,
        control: f32,
        inputs: &[Sequence<'_>],
        outputs: &mut [SequenceBuffer<'_>],
    ) {
        self.engine.process(control, inputs, outputs);
    }

    /// `None` for an engine built from a custom configuration.
    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }

    pub fn uri(&self) -> Option<&'static str> {
        self.variant.map(|variant| variant.descriptor().uri)
    }

    pub fn engine(&self) -> &RoutingEngine {
        &self.engine
    }

    pub fn last_block(&self) -> BlockStats {
        self.engine.last_block()
    }
}

impl Drop for Switchbox {
    fn drop(&mut self) {
        tracing::debug!(variant = ?self.variant, "switchbox released");
    }
}
