//! What the host hands a plugin at instantiation.

use switchbox_core::Urid;

/// URI of the host feature that maps URIs to integer ids.
pub const URID_MAP: &str = "http://lv2plug.in/ns/ext/urid#map";

/// URI of the MIDI event type.
pub const MIDI_EVENT: &str = "http://lv2plug.in/ns/ext/midi#MidiEvent";

/// Maps a URI to the host's integer id for it.
///
/// The same URI must map to the same id for the lifetime of the host. Any
/// `Fn(&str) -> Urid` closure is a map.
pub trait UridMap {
    fn map(&self, uri: &str) -> Urid;
}

impl<F> UridMap for F
where
    F: Fn(&str) -> Urid,
{
    fn map(&self, uri: &str) -> Urid {
        self(uri)
    }
}

/// Features offered by the host, all optional.
#[derive(Clone, Copy, Default)]
pub struct HostFeatures<'h> {
    urid_map: Option<&'h dyn UridMap>,
}

impl<'h> HostFeatures<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_urid_map(mut self, map: &'h dyn UridMap) -> Self {
        self.urid_map = Some(map);
        self
    }

    #[inline]
    pub fn urid_map(&self) -> Option<&'h dyn UridMap> {
        self.urid_map
    }

    /// The host's id for MIDI events, if it can map URIs.
    pub fn midi_event_type(&self) -> Option<Urid> {
        self.urid_map.map(|map| map.map(MIDI_EVENT))
    }
}

impl std::fmt::Debug for HostFeatures<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostFeatures")
            .field("urid_map", &self.urid_map.is_some())
            .finish()
    }
}
