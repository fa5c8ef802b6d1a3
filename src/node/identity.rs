//! Local node identity.

use crate::protocol::{NODE_ID_SIZE, NodeId};

/// Source of the stable identifier a node stamps on its frames.
pub trait IdentityProvider {
    /// Identifier of the local node.
    fn node_id(&self) -> NodeId;
}

impl IdentityProvider for NodeId {
    fn node_id(&self) -> NodeId {
        *self
    }
}

/// Identifier derived from a hardware chip id.
///
/// The chip id is rendered in decimal. In legacy mode the rendering is
/// zero-padded to `NODE_ID_SIZE - 2` digits and the last two characters are
/// then overwritten with characters `0` and `NODE_ID_SIZE - 3`, which is what
/// deployed nodes announce. Without the legacy rewrite the rendering is
/// zero-padded to the full width.
///
/// Chip id `0` derives the broadcast sentinel in both modes;
/// [`Node::new`](crate::Node::new) rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipIdentity {
    chip_id: u32,
    legacy: bool,
}

impl ChipIdentity {
    /// Derive with the legacy suffix rewrite.
    #[must_use]
    pub const fn new(chip_id: u32) -> Self {
        Self {
            chip_id,
            legacy: true,
        }
    }

    /// Choose whether the legacy suffix rewrite applies.
    #[must_use]
    pub const fn with_legacy_suffix(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    /// Hardware chip id.
    #[must_use]
    pub const fn chip_id(&self) -> u32 {
        self.chip_id
    }
}

impl IdentityProvider for ChipIdentity {
    fn node_id(&self) -> NodeId {
        let mut id = [b'0'; NODE_ID_SIZE];
        if self.legacy {
            let digits = format!("{:0width$}", self.chip_id, width = NODE_ID_SIZE - 2);
            id[..digits.len()].copy_from_slice(digits.as_bytes());
            id[NODE_ID_SIZE - 2] = id[0];
            id[NODE_ID_SIZE - 1] = id[NODE_ID_SIZE - 3];
        } else {
            let digits = format!("{:0width$}", self.chip_id, width = NODE_ID_SIZE);
            id.copy_from_slice(digits.as_bytes());
        }
        NodeId::from_bytes(id)
    }
}
