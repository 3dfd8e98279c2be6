//! Service types a viewer can be configured with.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::{UnsupportedReason, ViewerError};

/// Closed set of protocols (service types) a resource can be published with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProtocolKind {
    /// OGC Web Map Service.
    Wms,
    /// Generic `{z}/{x}/{y}` tile service.
    Xyz,
    /// Tile Map Service: XYZ tiles with rows counted from the bottom.
    Tms,
    /// ArcGIS dynamic map service.
    EsriDynamicMap,
    /// ArcGIS feature layer.
    EsriFeatureLayer,
    /// ArcGIS image service.
    EsriImageMap,
    /// ArcGIS tiled map service.
    EsriTiledMap,
    /// Index map of a scanned map series.
    IndexMap,
    /// OGC Web Map Tile Service.
    Wmts,
    /// TileJSON document describing a tile set.
    TileJson,
}

impl ProtocolKind {
    /// All protocols in declaration order.
    pub const ALL: [ProtocolKind; 10] = [
        ProtocolKind::Wms,
        ProtocolKind::Xyz,
        ProtocolKind::Tms,
        ProtocolKind::EsriDynamicMap,
        ProtocolKind::EsriFeatureLayer,
        ProtocolKind::EsriImageMap,
        ProtocolKind::EsriTiledMap,
        ProtocolKind::IndexMap,
        ProtocolKind::Wmts,
        ProtocolKind::TileJson,
    ];

    /// Canonical name of the protocol.
    pub fn name(&self) -> &'static str {
        match self {
            ProtocolKind::Wms => "Wms",
            ProtocolKind::Xyz => "Xyz",
            ProtocolKind::Tms => "Tms",
            ProtocolKind::EsriDynamicMap => "EsriDynamicMap",
            ProtocolKind::EsriFeatureLayer => "EsriFeatureLayer",
            ProtocolKind::EsriImageMap => "EsriImageMap",
            ProtocolKind::EsriTiledMap => "EsriTiledMap",
            ProtocolKind::IndexMap => "IndexMap",
            ProtocolKind::Wmts => "Wmts",
            ProtocolKind::TileJson => "Tilejson",
        }
    }

    /// Key of the protocol in the `VIEWERS` section of the viewer options.
    pub fn viewer_key(&self) -> String {
        self.name().to_ascii_uppercase()
    }
}

impl Display for ProtocolKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProtocolKind {
    type Err = ViewerError;

    /// Protocol names are matched ignoring ASCII case, so `WMS`, `Wms` and `wms` are the same
    /// protocol. This is looser than an exact match on the canonical [`name`](Self::name):
    /// a lowercase `wms` from resource metadata resolves to [`ProtocolKind::Wms`] instead of
    /// being reported as unrecognized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ViewerError::UnsupportedProtocol {
                protocol: s.to_string(),
                reason: UnsupportedReason::Unrecognized,
            })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!("WMS".parse::<ProtocolKind>().unwrap(), ProtocolKind::Wms);
        assert_eq!("xyz".parse::<ProtocolKind>().unwrap(), ProtocolKind::Xyz);
        assert_eq!(
            "TileJSON".parse::<ProtocolKind>().unwrap(),
            ProtocolKind::TileJson
        );
        assert_eq!(
            "IndexMap".parse::<ProtocolKind>().unwrap(),
            ProtocolKind::IndexMap
        );
    }

    #[test]
    fn every_name_parses_back() {
        for kind in ProtocolKind::ALL {
            assert_eq!(kind.name().parse::<ProtocolKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_is_unrecognized() {
        assert_matches!(
            "Gopher".parse::<ProtocolKind>(),
            Err(ViewerError::UnsupportedProtocol {
                reason: UnsupportedReason::Unrecognized,
                ..
            })
        );
    }

    #[test]
    fn viewer_key_is_uppercased_name() {
        assert_eq!(ProtocolKind::Wms.viewer_key(), "WMS");
        assert_eq!(ProtocolKind::EsriTiledMap.viewer_key(), "ESRITILEDMAP");
    }
}
