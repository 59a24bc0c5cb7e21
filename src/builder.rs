//! Builder for configuring and constructing a [`Switchbox`].

use switchbox_core::{EngineConfig, RoutingEngine};

use crate::descriptor::{self, Variant};
use crate::host::{HostFeatures, URID_MAP};
use crate::{Error, Result, Switchbox};

enum Source {
    Preset(Variant),
    Uri(String),
    Custom(EngineConfig),
}

/// Picks what to build (a shipped plugin or a custom engine configuration)
/// and collects the host features it needs.
///
/// Plugins that filter by event type or clean up stuck notes need the host's
/// URI map; building them without one fails with [`Error::MissingFeature`].
///
/// # Example
///
/// ```ignore
/// use switchbox::prelude::*;
///
/// let map = |uri: &str| -> Urid { host.map(uri) };
/// let mut plugin = Switchbox::builder()
///     .variant(Variant::Switchbox4In2Out)
///     .features(HostFeatures::new().with_urid_map(&map))
///     .build()?;
///
/// plugin.activate();
/// plugin.run(control, &inputs, &mut outputs);
/// ```
pub struct SwitchboxBuilder<'h> {
    source: Source,
    features: HostFeatures<'h>,
}

impl Default for SwitchboxBuilder<'_> {
    fn default() -> Self {
        Self {
            source: Source::Preset(Variant::Switchbox),
            features: HostFeatures::default(),
        }
    }
}

impl<'h> SwitchboxBuilder<'h> {
    /// Default: [`Variant::Switchbox`]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.source = Source::Preset(variant);
        self
    }

    /// Select a shipped plugin by URI. Unknown URIs fail in `build()`.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.source = Source::Uri(uri.into());
        self
    }

    /// Build an engine that matches none of the shipped plugins.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.source = Source::Custom(config);
        self
    }

    pub fn features(mut self, features: HostFeatures<'h>) -> Self {
        self.features = features;
        self
    }

    pub fn build(self) -> Result<Switchbox> {
        let (variant, config) = match self.source {
            Source::Preset(variant) => (Some(variant), variant.config()),
            Source::Uri(uri) => {
                let found = descriptor::find(&uri).ok_or_else(|| Error::UnknownPlugin(uri))?;
                (Some(found.variant), found.variant.config())
            }
            Source::Custom(config) => (None, config),
        };

        let midi_type = match self.features.midi_event_type() {
            Some(urid) => urid,
            None if config.needs_midi_type() => {
                tracing::warn!(?variant, "host did not provide {}", URID_MAP);
                return Err(Error::MissingFeature(URID_MAP));
            }
            // Never compared against anything that matters
            None => 0,
        };

        let engine = RoutingEngine::new(config, midi_type)?;
        tracing::debug!(?variant, midi_type, "switchbox instantiated");

        Ok(Switchbox::from_parts(variant, engine))
    }
}
