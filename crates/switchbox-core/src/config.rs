//! Routing engine configuration.

use serde::{Deserialize, Serialize};

use crate::cleanup::CleanupPolicy;
use crate::route_map::{RouteMap, MAX_PORTS};
use crate::selector::SelectorMode;
use crate::{Error, PortDirection, Result};

/// Which inbound events reach the outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFilter {
    /// Only events typed as MIDI; anything else is dropped.
    #[default]
    MidiOnly,
    /// Every event, whatever its type.
    All,
}

/// Everything that distinguishes one switchbox from another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub inputs: usize,
    pub outputs: usize,
    pub routes: RouteMap,
    #[serde(default)]
    pub selector: SelectorMode,
    #[serde(default)]
    pub cleanup: CleanupPolicy,
    #[serde(default)]
    pub filter: EventFilter,
}

impl EngineConfig {
    /// Empty routing table and default modes. Add routes before building an
    /// engine.
    pub fn new(inputs: usize, outputs: usize) -> Self {
        Self {
            inputs,
            outputs,
            routes: RouteMap::new(),
            selector: SelectorMode::default(),
            cleanup: CleanupPolicy::default(),
            filter: EventFilter::default(),
        }
    }

    pub fn routes(mut self, routes: RouteMap) -> Self {
        self.routes = routes;
        self
    }

    pub fn selector(mut self, selector: SelectorMode) -> Self {
        self.selector = selector;
        self
    }

    pub fn cleanup(mut self, cleanup: CleanupPolicy) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn filter(mut self, filter: EventFilter) -> Self {
        self.filter = filter;
        self
    }

    #[inline]
    pub fn route_count(&self) -> usize {
        self.routes.route_count()
    }

    /// Whether the engine has to recognize MIDI events by type id.
    pub fn needs_midi_type(&self) -> bool {
        self.filter == EventFilter::MidiOnly || self.cleanup != CleanupPolicy::None
    }

    pub fn validate(&self) -> Result<()> {
        let result = self.check();
        if let Err(ref error) = result {
            tracing::warn!(%error, "rejected engine configuration");
        }
        result
    }

    fn check(&self) -> Result<()> {
        for (direction, count) in [
            (PortDirection::Input, self.inputs),
            (PortDirection::Output, self.outputs),
        ] {
            if count == 0 || count > MAX_PORTS {
                return Err(Error::PortCount {
                    direction,
                    count,
                    max: MAX_PORTS,
                });
            }
        }

        self.routes.validate(self.inputs, self.outputs)?;

        if self.selector == SelectorMode::Threshold && self.route_count() != 2 {
            return Err(Error::RouteCountMismatch {
                expected: 2,
                found: self.route_count(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleanup::CleanupTarget;

    fn one_to_two() -> EngineConfig {
        EngineConfig::new(1, 2).routes(RouteMap::new().with_route(&[(0, 0)]).with_route(&[(0, 1)]))
    }

    #[test]
    fn test_builder_defaults() {
        let config = one_to_two();
        assert_eq!(config.selector, SelectorMode::Truncate);
        assert_eq!(config.cleanup, CleanupPolicy::None);
        assert_eq!(config.filter, EventFilter::MidiOnly);
        assert_eq!(config.route_count(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_port_count_bounds() {
        assert_eq!(
            EngineConfig::new(0, 1).validate(),
            Err(Error::PortCount {
                direction: PortDirection::Input,
                count: 0,
                max: MAX_PORTS,
            })
        );
        assert_eq!(
            EngineConfig::new(1, MAX_PORTS + 1).validate(),
            Err(Error::PortCount {
                direction: PortDirection::Output,
                count: MAX_PORTS + 1,
                max: MAX_PORTS,
            })
        );
    }

    #[test]
    fn test_routes_are_validated() {
        assert_eq!(EngineConfig::new(1, 1).validate(), Err(Error::NoRoutes));

        let config = EngineConfig::new(1, 1).routes(RouteMap::new().with_route(&[(0, 1)]));
        assert!(matches!(
            config.validate(),
            Err(Error::PortOutOfRange {
                direction: PortDirection::Output,
                ..
            })
        ));
    }

    #[test]
    fn test_threshold_needs_two_routes() {
        let config = EngineConfig::new(1, 3)
            .routes(
                RouteMap::new()
                    .with_route(&[(0, 0)])
                    .with_route(&[(0, 1)])
                    .with_route(&[(0, 2)]),
            )
            .selector(SelectorMode::Threshold);
        assert_eq!(
            config.validate(),
            Err(Error::RouteCountMismatch {
                expected: 2,
                found: 3
            })
        );
        assert!(one_to_two().selector(SelectorMode::Threshold).validate().is_ok());
    }

    #[test]
    fn test_needs_midi_type() {
        assert!(one_to_two().needs_midi_type());
        assert!(!one_to_two().filter(EventFilter::All).needs_midi_type());
        assert!(one_to_two()
            .filter(EventFilter::All)
            .cleanup(CleanupPolicy::Coarse {
                target: CleanupTarget::Entered
            })
            .needs_midi_type());
    }
}
