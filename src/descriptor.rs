//! The five switchbox plugins and their port layouts.
//!
//! Every plugin uses the same layout: port 0 is the route-select control,
//! then the event inputs, then the event outputs.

use switchbox_core::{
    CleanupPolicy, CleanupTarget, EngineConfig, EventFilter, RouteMap, SelectorMode,
};

/// One of the shipped switchbox presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 1 in, 2 out, two-way switch. Forwards every event and sends no cleanup.
    Switchbox,
    /// 1 in, 2 out. Sweeps the outputs being left.
    Switchbox1To2,
    /// 2 in, 1 out. Sweeps the output being entered.
    Switchbox2To1,
    /// Two parallel inputs switched between output pairs (1,2) and (3,4).
    /// Sweeps all four outputs.
    Switchbox1To2TwoChannel,
    /// Input pairs (1,2) and (3,4) switched onto outputs (1,2). Releases
    /// exactly the notes left sounding. Non-MIDI events pass through.
    Switchbox4In2Out,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Switchbox,
        Variant::Switchbox1To2,
        Variant::Switchbox2To1,
        Variant::Switchbox1To2TwoChannel,
        Variant::Switchbox4In2Out,
    ];

    pub fn inputs(self) -> usize {
        match self {
            Variant::Switchbox | Variant::Switchbox1To2 => 1,
            Variant::Switchbox2To1 | Variant::Switchbox1To2TwoChannel => 2,
            Variant::Switchbox4In2Out => 4,
        }
    }

    pub fn outputs(self) -> usize {
        match self {
            Variant::Switchbox2To1 => 1,
            Variant::Switchbox | Variant::Switchbox1To2 | Variant::Switchbox4In2Out => 2,
            Variant::Switchbox1To2TwoChannel => 4,
        }
    }

    /// Engine preset for this plugin.
    pub fn config(self) -> EngineConfig {
        let config = EngineConfig::new(self.inputs(), self.outputs());
        match self {
            Variant::Switchbox => config
                .routes(RouteMap::new().with_route(&[(0, 0)]).with_route(&[(0, 1)]))
                .selector(SelectorMode::Threshold)
                .cleanup(CleanupPolicy::None)
                .filter(EventFilter::All),
            Variant::Switchbox1To2 => config
                .routes(RouteMap::new().with_route(&[(0, 0)]).with_route(&[(0, 1)]))
                .cleanup(CleanupPolicy::Coarse {
                    target: CleanupTarget::Vacated,
                }),
            Variant::Switchbox2To1 => config
                .routes(RouteMap::new().with_route(&[(0, 0)]).with_route(&[(1, 0)]))
                .cleanup(CleanupPolicy::Coarse {
                    target: CleanupTarget::Entered,
                }),
            Variant::Switchbox1To2TwoChannel => config
                .routes(
                    RouteMap::new()
                        .with_route(&[(0, 0), (1, 1)])
                        .with_route(&[(0, 2), (1, 3)]),
                )
                .cleanup(CleanupPolicy::Coarse {
                    target: CleanupTarget::AllOutputs,
                }),
            Variant::Switchbox4In2Out => config
                .routes(
                    RouteMap::new()
                        .with_route(&[(0, 0), (1, 1)])
                        .with_route(&[(2, 0), (3, 1)]),
                )
                .selector(SelectorMode::Threshold)
                .cleanup(CleanupPolicy::ExactNote)
                .filter(EventFilter::All),
        }
    }

    pub fn descriptor(self) -> &'static Descriptor {
        &DESCRIPTORS[self as usize]
    }
}

/// What a host port index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    /// Route-select control value.
    Control,
    /// Event input, by input index.
    Input(usize),
    /// Event output, by output index.
    Output(usize),
}

/// A plugin's identity as the host sees it.
#[derive(Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub uri: &'static str,
    pub variant: Variant,
}

impl Descriptor {
    pub fn port_count(&self) -> usize {
        1 + self.variant.inputs() + self.variant.outputs()
    }

    /// `None` past the last port.
    pub fn port(&self, index: usize) -> Option<PortKind> {
        let inputs = self.variant.inputs();
        match index {
            0 => Some(PortKind::Control),
            i if i <= inputs => Some(PortKind::Input(i - 1)),
            i if i < self.port_count() => Some(PortKind::Output(i - 1 - inputs)),
            _ => None,
        }
    }
}

/// Indexed in [`Variant`] declaration order.
static DESCRIPTORS: [Descriptor; 5] = [
    Descriptor {
        uri: "http://moddevices.com/plugins/mod-devel/MIDI-Switchbox",
        variant: Variant::Switchbox,
    },
    Descriptor {
        uri: "http://moddevices.com/plugins/mod-devel/MIDI-Switchbox_1-2",
        variant: Variant::Switchbox1To2,
    },
    Descriptor {
        uri: "http://moddevices.com/plugins/mod-devel/midi-switchbox_2-1",
        variant: Variant::Switchbox2To1,
    },
    Descriptor {
        uri: "http://moddevices.com/plugins/mod-devel/midi-switchbox_1-2_2C",
        variant: Variant::Switchbox1To2TwoChannel,
    },
    Descriptor {
        uri: "http://moddevices.com/plugins/mod-devel/midi-switchbox-4inx2out",
        variant: Variant::Switchbox4In2Out,
    },
];

/// Host enumeration entry point.
pub fn descriptor(index: usize) -> Option<&'static Descriptor> {
    DESCRIPTORS.get(index)
}

pub fn find(uri: &str) -> Option<&'static Descriptor> {
    let found = DESCRIPTORS.iter().find(|descriptor| descriptor.uri == uri);
    if found.is_none() {
        tracing::debug!(uri, "no switchbox plugin with this URI");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_variants() {
        for (index, variant) in Variant::ALL.into_iter().enumerate() {
            let descriptor = descriptor(index).unwrap();
            assert_eq!(descriptor.variant, variant);
            assert_eq!(variant.descriptor(), descriptor);
            assert_eq!(find(descriptor.uri), Some(descriptor));
        }
        assert!(descriptor(Variant::ALL.len()).is_none());
        assert!(find("http://example.org/not-a-switchbox").is_none());
    }

    #[test]
    fn test_presets_are_valid() {
        for variant in Variant::ALL {
            let config = variant.config();
            assert_eq!(config.inputs, variant.inputs());
            assert_eq!(config.outputs, variant.outputs());
            assert!(config.validate().is_ok(), "{variant:?}");
        }
    }

    #[test]
    fn test_port_layout() {
        let four_in = Variant::Switchbox4In2Out.descriptor();
        assert_eq!(four_in.port_count(), 7);
        assert_eq!(four_in.port(0), Some(PortKind::Control));
        assert_eq!(four_in.port(1), Some(PortKind::Input(0)));
        assert_eq!(four_in.port(4), Some(PortKind::Input(3)));
        assert_eq!(four_in.port(5), Some(PortKind::Output(0)));
        assert_eq!(four_in.port(6), Some(PortKind::Output(1)));
        assert_eq!(four_in.port(7), None);

        let two_to_one = Variant::Switchbox2To1.descriptor();
        assert_eq!(two_to_one.port(3), Some(PortKind::Output(0)));
        assert_eq!(two_to_one.port(4), None);
    }

    #[test]
    fn test_only_plain_switchbox_works_without_urid_map() {
        for variant in Variant::ALL {
            let plain = variant == Variant::Switchbox;
            assert_eq!(!variant.config().needs_midi_type(), plain);
        }
    }
}
