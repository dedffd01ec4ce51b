//! Clock template parsing
//!
//! A clock template is the reusable blueprint of one broadcast hour. The
//! parser loads the stored slot descriptors, validates the template
//! invariants, and holds them position-indexed for the assembler.

use crate::error::{EngineError, EngineResult};
use crate::store::LibraryStore;
use crate::types::ClockSlot;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Parsed, validated clock pattern for one template
#[derive(Debug, Clone)]
pub struct ClockPattern {
    template_id: Uuid,
    slots: Vec<ClockSlot>,
    by_position: HashMap<i64, usize>,
}

impl ClockPattern {
    /// Load and validate the pattern for `template_id`.
    ///
    /// Fails with `TemplateNotFound` when the id does not resolve and
    /// `EmptyPattern` when the template has no slots. Both are fatal for the
    /// requesting hour: nothing can be assembled without a skeleton.
    pub async fn load(store: &dyn LibraryStore, template_id: Uuid) -> EngineResult<Self> {
        let slots = store.get_template(template_id).await?;
        Self::from_slots(template_id, slots)
    }

    /// Build a pattern from already-loaded slot descriptors
    pub fn from_slots(template_id: Uuid, slots: Vec<ClockSlot>) -> EngineResult<Self> {
        if slots.is_empty() {
            return Err(EngineError::EmptyPattern(template_id));
        }

        // Positions must be unique and monotonically increasing
        for pair in slots.windows(2) {
            if pair[1].position <= pair[0].position {
                return Err(EngineError::InvalidPattern {
                    template_id,
                    reason: format!(
                        "positions not strictly increasing: {} then {}",
                        pair[0].position, pair[1].position
                    ),
                });
            }
        }

        let by_position = slots
            .iter()
            .enumerate()
            .map(|(idx, slot)| (slot.position, idx))
            .collect();

        debug!(template_id = %template_id, slots = slots.len(), "Loaded clock pattern");

        Ok(Self {
            template_id,
            slots,
            by_position,
        })
    }

    pub fn template_id(&self) -> Uuid {
        self.template_id
    }

    /// Slots in scanning (position) order
    pub fn slots(&self) -> &[ClockSlot] {
        &self.slots
    }

    /// O(1) lookup by template position
    pub fn slot_at(&self, position: i64) -> Option<&ClockSlot> {
        self.by_position.get(&position).map(|idx| &self.slots[*idx])
    }

    /// Number of music slots in the pattern
    pub fn music_slot_count(&self) -> usize {
        self.slots.iter().filter(|s| s.category.is_music()).count()
    }
}
