//! Dispatch from a protocol to the constructor of the overlay layer.

use std::collections::HashMap;

use async_trait::async_trait;
use maybe_sync::{MaybeSend, MaybeSync};

use super::{Layer, LayerOptions, TileLayerBuilder, WmsLayer};
use crate::error::{UnsupportedReason, ViewerError};
use crate::protocol::ProtocolKind;

/// Constructs an overlay layer for a resource published at `url`.
///
/// Any function or closure with the signature `Fn(&str, LayerOptions) -> Result<Box<dyn Layer>, ViewerError>`
/// is a constructor.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait OverlayConstructor: MaybeSend + MaybeSync {
    /// Creates the layer. Construction may require talking to the service, so it is asynchronous.
    async fn construct(
        &self,
        url: &str,
        options: LayerOptions,
    ) -> Result<Box<dyn Layer>, ViewerError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<F> OverlayConstructor for F
where
    F: Fn(&str, LayerOptions) -> Result<Box<dyn Layer>, ViewerError> + MaybeSend + MaybeSync,
{
    async fn construct(
        &self,
        url: &str,
        options: LayerOptions,
    ) -> Result<Box<dyn Layer>, ViewerError> {
        self(url, options)
    }
}

/// Table of overlay constructors keyed by protocol.
///
/// The default factory can render [`ProtocolKind::Wms`], [`ProtocolKind::Xyz`] and
/// [`ProtocolKind::Tms`] resources. Other protocols are known, but have no constructor yet.
pub struct LayerFactory {
    constructors: HashMap<ProtocolKind, Box<dyn OverlayConstructor>>,
}

impl LayerFactory {
    /// Creates a factory that supports no protocols.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers the constructor for the protocol, replacing the existing one.
    pub fn with_constructor(
        mut self,
        protocol: ProtocolKind,
        constructor: impl OverlayConstructor + 'static,
    ) -> Self {
        self.constructors.insert(protocol, Box::new(constructor));
        self
    }

    /// Returns true if a constructor is registered for the protocol.
    pub fn supports(&self, protocol: ProtocolKind) -> bool {
        self.constructors.contains_key(&protocol)
    }

    /// Builds the overlay layer for the resource.
    ///
    /// Returns [`ViewerError::UnsupportedProtocol`] with [`UnsupportedReason::NotYetImplemented`]
    /// if the protocol has no registered constructor.
    pub async fn build(
        &self,
        protocol: ProtocolKind,
        url: &str,
        options: LayerOptions,
    ) -> Result<Box<dyn Layer>, ViewerError> {
        let Some(constructor) = self.constructors.get(&protocol) else {
            return Err(ViewerError::UnsupportedProtocol {
                protocol: protocol.name().to_string(),
                reason: UnsupportedReason::NotYetImplemented,
            });
        };

        log::debug!("Constructing {protocol} overlay for {url}");
        constructor.construct(url, options).await
    }

    /// Same as [`LayerFactory::build`], but takes the protocol name as given in the configuration.
    /// Unknown names result in [`UnsupportedReason::Unrecognized`].
    pub async fn build_named(
        &self,
        protocol: &str,
        url: &str,
        options: LayerOptions,
    ) -> Result<Box<dyn Layer>, ViewerError> {
        let protocol: ProtocolKind = protocol.parse()?;
        self.build(protocol, url, options).await
    }
}

impl Default for LayerFactory {
    fn default() -> Self {
        Self::empty()
            .with_constructor(ProtocolKind::Wms, wms_overlay)
            .with_constructor(ProtocolKind::Xyz, xyz_overlay)
            .with_constructor(ProtocolKind::Tms, tms_overlay)
    }
}

fn wms_overlay(url: &str, options: LayerOptions) -> Result<Box<dyn Layer>, ViewerError> {
    Ok(Box::new(WmsLayer::new(url, options)?))
}

fn xyz_overlay(url: &str, options: LayerOptions) -> Result<Box<dyn Layer>, ViewerError> {
    Ok(Box::new(
        TileLayerBuilder::new(url).with_options(options).build()?,
    ))
}

fn tms_overlay(url: &str, options: LayerOptions) -> Result<Box<dyn Layer>, ViewerError> {
    Ok(Box::new(
        TileLayerBuilder::new(url)
            .with_options(options)
            .with_tms(true)
            .build()?,
    ))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::layer::{TestLayer, TileLayer};

    fn options() -> LayerOptions {
        LayerOptions {
            layer_id: Some("druid:zz123".into()),
            opacity: Some(0.75),
            detect_retina: true,
            tms: false,
        }
    }

    #[tokio::test]
    async fn xyz_forwards_options() {
        let layer = LayerFactory::default()
            .build(
                ProtocolKind::Xyz,
                "https://tiles.example.org/{z}/{x}/{y}.png",
                options(),
            )
            .await
            .unwrap();

        let layer = layer.as_any().downcast_ref::<TileLayer>().unwrap();
        assert_eq!(layer.options(), &options());
        assert!(!layer.is_tms());
    }

    #[tokio::test]
    async fn tms_flag_is_forced() {
        let layer = LayerFactory::default()
            .build(
                ProtocolKind::Tms,
                "https://tiles.example.org/{z}/{x}/{y}.png",
                options(),
            )
            .await
            .unwrap();

        let layer = layer.as_any().downcast_ref::<TileLayer>().unwrap();
        assert!(layer.is_tms());
        assert_eq!(layer.options().layer_id.as_deref(), Some("druid:zz123"));
        assert_eq!(layer.options().opacity, Some(0.75));
        assert!(layer.options().detect_retina);
    }

    #[tokio::test]
    async fn wms_forwards_layer_id() {
        let layer = LayerFactory::default()
            .build(ProtocolKind::Wms, "https://geo.example.org/wms", options())
            .await
            .unwrap();

        let layer = layer.as_any().downcast_ref::<WmsLayer>().unwrap();
        assert_eq!(layer.options(), &options());
        assert_eq!(layer.url(), "https://geo.example.org/wms");
    }

    #[tokio::test]
    async fn deferred_protocols_are_not_implemented() {
        let factory = LayerFactory::default();
        for protocol in ProtocolKind::ALL {
            if matches!(
                protocol,
                ProtocolKind::Wms | ProtocolKind::Xyz | ProtocolKind::Tms
            ) {
                assert!(factory.supports(protocol));
                continue;
            }

            assert!(!factory.supports(protocol));
            assert_matches!(
                factory.build(protocol, "https://x", options()).await.err(),
                Some(ViewerError::UnsupportedProtocol {
                    reason: UnsupportedReason::NotYetImplemented,
                    ..
                })
            );
        }
    }

    #[tokio::test]
    async fn unknown_name_is_unrecognized() {
        let result = LayerFactory::default()
            .build_named("Gopher", "https://x", options())
            .await;

        assert_matches!(
            result.err(),
            Some(ViewerError::UnsupportedProtocol {
                reason: UnsupportedReason::Unrecognized,
                ..
            })
        );
    }

    #[tokio::test]
    async fn custom_constructor() {
        let factory = LayerFactory::empty().with_constructor(
            ProtocolKind::IndexMap,
            |_url: &str, options: LayerOptions| -> Result<Box<dyn Layer>, ViewerError> {
                Ok(Box::new(TestLayer(
                    "index",
                    options.opacity.unwrap_or_default(),
                )))
            },
        );

        let layer = factory
            .build_named("IndexMap", "https://x", options())
            .await
            .unwrap();
        assert_eq!(layer.opacity(), 0.75);
        assert!(!factory.supports(ProtocolKind::Wms));
    }

    #[tokio::test]
    async fn constructor_errors_are_returned() {
        let result = LayerFactory::default()
            .build(ProtocolKind::Xyz, "", options())
            .await;
        assert_matches!(result.err(), Some(ViewerError::InvalidLayer(_)));
    }
}
