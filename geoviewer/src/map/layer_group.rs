use crate::layer::Layer;

/// Identifier of a layer in a [`LayerGroup`]. Handles are never reused by the group that issued
/// them, so a handle of a removed layer stays invalid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerHandle(u64);

/// Ordered group of overlay layers.
///
/// When a map is rendered, it draws all visible layers in the order they were added to the group.
/// A layer can be temporarily hidden with [`LayerGroup::hide`]. Hidden layers are ignored by the
/// renderer, but retain their place in the group.
///
/// Layers are stored as trait objects. Use downcasting through the `Any` trait to get the concrete
/// layer type back:
///
/// ```
/// use geoviewer::layer::{PolygonLayer, TileLayerBuilder};
/// use geoviewer::map::LayerGroup;
///
/// let mut group = LayerGroup::default();
/// group.push(TileLayerBuilder::new_osm().build()?);
/// let preview = group.push(PolygonLayer::new(vec![]));
///
/// assert!(group.get(preview).unwrap().as_any().downcast_ref::<PolygonLayer>().is_some());
/// # Ok::<(), geoviewer::error::ViewerError>(())
/// ```
#[derive(Default)]
pub struct LayerGroup {
    entries: Vec<LayerEntry>,
    next_handle: u64,
}

struct LayerEntry {
    handle: LayerHandle,
    layer: Box<dyn Layer>,
    is_hidden: bool,
}

impl LayerGroup {
    /// Adds the layer to the end of the group.
    pub fn push(&mut self, layer: impl Layer + 'static) -> LayerHandle {
        self.push_boxed(Box::new(layer))
    }

    /// Adds a boxed layer to the end of the group.
    pub fn push_boxed(&mut self, layer: Box<dyn Layer>) -> LayerHandle {
        let handle = LayerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(LayerEntry {
            handle,
            layer,
            is_hidden: false,
        });

        handle
    }

    /// Removes the layer from the group and returns it. Returns `None` if the layer is not in the
    /// group.
    pub fn remove(&mut self, handle: LayerHandle) -> Option<Box<dyn Layer>> {
        let index = self.index_of(handle)?;
        Some(self.entries.remove(index).layer)
    }

    /// Returns true if the layer is in the group.
    pub fn contains(&self, handle: LayerHandle) -> bool {
        self.index_of(handle).is_some()
    }

    /// Returns the layer.
    pub fn get(&self, handle: LayerHandle) -> Option<&dyn Layer> {
        self.entry(handle).map(|entry| &*entry.layer)
    }

    /// Returns the layer as mutable.
    pub fn get_mut(&mut self, handle: LayerHandle) -> Option<&mut Box<dyn Layer>> {
        self.entries
            .iter_mut()
            .find(|entry| entry.handle == handle)
            .map(|entry| &mut entry.layer)
    }

    /// Returns the number of layers, including hidden ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the group has no layers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all layers.
    pub fn clear(&mut self) {
        self.entries.clear()
    }

    /// Handles of all layers in drawing order.
    pub fn handles(&self) -> impl Iterator<Item = LayerHandle> + '_ {
        self.entries.iter().map(|entry| entry.handle)
    }

    /// Iterates over all layers in drawing order, including hidden ones.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Layer> + '_ {
        self.entries.iter().map(|entry| &*entry.layer)
    }

    /// Iterates over the layers that should be drawn.
    pub fn iter_visible(&self) -> impl Iterator<Item = &dyn Layer> + '_ {
        self.entries
            .iter()
            .filter(|entry| !entry.is_hidden)
            .map(|entry| &*entry.layer)
    }

    /// Hides the layer. Returns false if the layer is not in the group.
    pub fn hide(&mut self, handle: LayerHandle) -> bool {
        self.set_hidden(handle, true)
    }

    /// Shows a previously hidden layer. Returns false if the layer is not in the group.
    pub fn show(&mut self, handle: LayerHandle) -> bool {
        self.set_hidden(handle, false)
    }

    /// Returns true if the layer is hidden. Layers not in the group are reported as not hidden.
    pub fn is_hidden(&self, handle: LayerHandle) -> bool {
        self.entry(handle).is_some_and(|entry| entry.is_hidden)
    }

    fn set_hidden(&mut self, handle: LayerHandle, is_hidden: bool) -> bool {
        match self.entries.iter_mut().find(|entry| entry.handle == handle) {
            Some(entry) => {
                entry.is_hidden = is_hidden;
                true
            }
            None => false,
        }
    }

    fn entry(&self, handle: LayerHandle) -> Option<&LayerEntry> {
        self.entries.iter().find(|entry| entry.handle == handle)
    }

    fn index_of(&self, handle: LayerHandle) -> Option<usize> {
        self.entries.iter().position(|entry| entry.handle == handle)
    }
}
