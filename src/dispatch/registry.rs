//! Handler table keyed by frame tag

use std::collections::HashMap;
use std::fmt;

use crate::protocol::DataType;

/// Local consumer of decoded commands and readings
///
/// Handlers run inside the transport's receive pass, so they must return
/// quickly and never block.
pub type Handler = dyn FnMut(DataType, f32);

/// Mapping from wire tag to handler, populated at startup
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<u8, Box<Handler>>,
}

impl HandlerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, returning the one it replaces
    pub fn register<F>(&mut self, data_type: DataType, handler: F) -> Option<Box<Handler>>
    where
        F: FnMut(DataType, f32) + 'static,
    {
        self.handlers.insert(data_type.as_u8(), Box::new(handler))
    }

    /// Builder-style [`register`](Self::register)
    #[must_use]
    pub fn with<F>(mut self, data_type: DataType, handler: F) -> Self
    where
        F: FnMut(DataType, f32) + 'static,
    {
        self.register(data_type, handler);
        self
    }

    /// Look up the handler for a tag
    pub fn get_mut(&mut self, data_type: DataType) -> Option<&mut Handler> {
        self.handlers.get_mut(&data_type.as_u8()).map(Box::as_mut)
    }

    /// Check whether a tag has a handler
    #[must_use]
    pub fn contains(&self, data_type: DataType) -> bool {
        self.handlers.contains_key(&data_type.as_u8())
    }

    /// Number of registered tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handler is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<DataType> = self.handlers.keys().map(|&t| DataType::from_u8(t)).collect();
        tags.sort_by_key(|t| t.as_u8());
        f.debug_struct("HandlerRegistry").field("tags", &tags).finish()
    }
}
