//! Route → (input, output) wiring, as data.
//!
//! ```text
//! RouteMap (config, serde)            RouteSnapshot (engine, RT)
//! ┌──────────────────────────┐        ┌─────────────────────────────┐
//! │ route 0: in0→out0        │──new──▶│ targets[route][input]: set  │
//! │ route 1: in0→out1        │        │ outputs[route]: set         │
//! └──────────────────────────┘        └─────────────────────────────┘
//! ```
//!
//! The snapshot precomputes per-(route, input) output sets so that the block
//! driver's lookup is a single array index.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::compat::Vec;
use crate::error::{Error, PortDirection, Result};
use crate::selector::Route;

/// Maximum number of inputs, and of outputs, one engine can have.
pub const MAX_PORTS: usize = 8;

/// Connections stored inline per route before spilling to the heap.
const INLINE_CONNECTIONS: usize = 4;

/// One input feeding one output while a route is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub input: usize,
    pub output: usize,
}

impl Connection {
    #[inline]
    pub fn new(input: usize, output: usize) -> Self {
        Self { input, output }
    }
}

/// Set of output indices (`< MAX_PORTS`), iterated in ascending order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OutputSet(u8);

impl OutputSet {
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Outputs `0..count`.
    #[inline]
    pub fn all(count: usize) -> Self {
        let count = count.min(MAX_PORTS);
        Self(((1u16 << count) - 1) as u8)
    }

    #[inline]
    pub fn insert(&mut self, output: usize) {
        if output < MAX_PORTS {
            self.0 |= 1 << output;
        }
    }

    #[inline]
    pub fn contains(&self, output: usize) -> bool {
        output < MAX_PORTS && self.0 & (1 << output) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let bits = self.0;
        (0..MAX_PORTS).filter(move |&output| bits & (1 << output) != 0)
    }
}

impl FromIterator<usize> for OutputSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::empty();
        for output in iter {
            set.insert(output);
        }
        set
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct RouteEntry {
    connections: SmallVec<[Connection; INLINE_CONNECTIONS]>,
}

/// Ordered list of routes, each a list of connections.
///
/// A route with no connections is valid: it mutes every input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteMap {
    routes: Vec<RouteEntry>,
}

impl RouteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route built from `(input, output)` pairs.
    pub fn with_route(mut self, pairs: &[(usize, usize)]) -> Self {
        self.route();
        for &(input, output) in pairs {
            self.connect(input, output);
        }
        self
    }

    /// Start a new, empty route. Following `connect()` calls add to it.
    pub fn route(&mut self) -> &mut Self {
        self.routes.push(RouteEntry::default());
        self
    }

    /// Connect `input` to `output` on the most recently started route,
    /// starting route 0 if there is none yet.
    pub fn connect(&mut self, input: usize, output: usize) -> &mut Self {
        if self.routes.is_empty() {
            self.route();
        }
        if let Some(entry) = self.routes.last_mut() {
            entry.connections.push(Connection::new(input, output));
        }
        self
    }

    #[inline]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn connections(&self, route: Route) -> &[Connection] {
        self.routes
            .get(route)
            .map(|entry| entry.connections.as_slice())
            .unwrap_or(&[])
    }

    /// Check every connection against the port counts.
    pub fn validate(&self, inputs: usize, outputs: usize) -> Result<()> {
        if self.routes.is_empty() {
            return Err(Error::NoRoutes);
        }

        for (route, entry) in self.routes.iter().enumerate() {
            for (i, connection) in entry.connections.iter().enumerate() {
                if connection.input >= inputs {
                    return Err(Error::PortOutOfRange {
                        route,
                        direction: PortDirection::Input,
                        index: connection.input,
                        count: inputs,
                    });
                }
                if connection.output >= outputs {
                    return Err(Error::PortOutOfRange {
                        route,
                        direction: PortDirection::Output,
                        index: connection.output,
                        count: outputs,
                    });
                }
                if entry.connections[..i].contains(connection) {
                    return Err(Error::DuplicateConnection {
                        route,
                        input: connection.input,
                        output: connection.output,
                    });
                }
            }
        }
        Ok(())
    }

    /// Precompute lookups. Connections beyond `MAX_PORTS` are ignored, so
    /// validate first.
    pub fn snapshot(&self) -> RouteSnapshot {
        RouteSnapshot::from_routes(&self.routes)
    }
}

/// Immutable, precomputed form of a [`RouteMap`] for the block driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteSnapshot {
    /// Outputs fed by each input, per route.
    targets: Vec<[OutputSet; MAX_PORTS]>,
    /// Every output fed by each route.
    outputs: Vec<OutputSet>,
}

impl RouteSnapshot {
    fn from_routes(routes: &[RouteEntry]) -> Self {
        let mut targets = vec![[OutputSet::empty(); MAX_PORTS]; routes.len()];
        let mut outputs = vec![OutputSet::empty(); routes.len()];

        for (route, entry) in routes.iter().enumerate() {
            for connection in &entry.connections {
                if connection.input >= MAX_PORTS {
                    continue;
                }
                targets[route][connection.input].insert(connection.output);
                outputs[route].insert(connection.output);
            }
        }

        Self { targets, outputs }
    }

    #[inline]
    pub fn route_count(&self) -> usize {
        self.outputs.len()
    }

    /// Outputs `input` feeds while `route` is selected.
    #[inline]
    pub fn targets(&self, route: Route, input: usize) -> OutputSet {
        self.targets
            .get(route)
            .and_then(|inputs| inputs.get(input))
            .copied()
            .unwrap_or_default()
    }

    /// Every output fed by `route`.
    #[inline]
    pub fn outputs(&self, route: Route) -> OutputSet {
        self.outputs.get(route).copied().unwrap_or_default()
    }
}
