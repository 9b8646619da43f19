//! The stage: an ordered display list that doubles as the registry of live
//! entities.  Every entity is admitted here on spawn and leaves exactly once,
//! either through its own death or through a bulk clear.

use tracing::{debug, info};

use crate::entities::{
    Entity, EntityId, Overlay, RenderFlags, Screen, StageItem, Tag, UNSTAGED,
};
use crate::store::Scoreboard;

#[derive(Debug, Default)]
pub struct Stage {
    items: Vec<StageItem>,
    next_id: EntityId,
    /// Flags captured by `stop_and_stage`, restored by `play_and_unstage`.
    suspended: Vec<(EntityId, RenderFlags)>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display list, bottom to top.
    pub fn items(&self) -> &[StageItem] {
        &self.items
    }

    fn admit(&mut self, item: StageItem) -> (StageItem, Option<EntityId>) {
        match item {
            StageItem::Entity(mut entity) => {
                self.next_id += 1;
                entity.id = self.next_id;
                debug!(id = entity.id, kind = ?entity.kind, x = entity.x, y = entity.y, "staged");
                let id = entity.id;
                (StageItem::Entity(entity), Some(id))
            }
            other => (other, None),
        }
    }

    /// Put `item` on top of the display list.
    pub fn add(&mut self, item: StageItem) -> Option<EntityId> {
        let (item, id) = self.admit(item);
        self.items.push(item);
        id
    }

    /// Stage an entity directly beneath the scoreboard, so it draws above the
    /// background and other entities while the scoreboard stays topmost.
    pub fn insert_below_scoreboard(&mut self, entity: Entity) -> EntityId {
        debug_assert_eq!(entity.id, UNSTAGED);
        let (item, id) = self.admit(StageItem::Entity(entity));
        let at = self
            .items
            .iter()
            .position(|i| matches!(i, StageItem::Scoreboard))
            .unwrap_or(self.items.len());
        self.items.insert(at, item);
        id.unwrap_or(UNSTAGED)
    }

    /// Remove an entity from the stage, handing ownership back to the caller.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let at = self
            .items
            .iter()
            .position(|i| matches!(i, StageItem::Entity(e) if e.id == id))?;
        self.suspended.retain(|(sid, _)| *sid != id);
        match self.items.remove(at) {
            StageItem::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    // ── Tracked-object enumeration ───────────────────────────────────────────

    pub fn tracked(&self) -> impl Iterator<Item = &Entity> {
        self.items.iter().filter_map(|i| match i {
            StageItem::Entity(e) => Some(e),
            _ => None,
        })
    }

    pub fn tracked_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.items.iter_mut().filter_map(|i| match i {
            StageItem::Entity(e) => Some(e),
            _ => None,
        })
    }

    /// Ids of every tracked entity in display order.
    pub fn tracked_ids(&self) -> Vec<EntityId> {
        self.tracked().map(|e| e.id).collect()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.tracked().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.tracked_mut().find(|e| e.id == id)
    }

    /// Topmost tracked entity matching `pred`.
    pub fn topmost(&self, pred: impl Fn(&Entity) -> bool) -> Option<EntityId> {
        self.items.iter().rev().find_map(|i| match i {
            StageItem::Entity(e) if pred(e) => Some(e.id),
            _ => None,
        })
    }

    pub fn count(&self, tag: Tag) -> usize {
        self.tracked().filter(|e| e.tag() == tag).count()
    }

    pub fn has_screen(&self, screen: Screen) -> bool {
        self.items
            .iter()
            .any(|i| matches!(i, StageItem::Screen(s) if *s == screen))
    }

    /// The first full-screen item, which decides what the player is looking at.
    pub fn screen(&self) -> Option<Screen> {
        self.items.iter().find_map(|i| match i {
            StageItem::Screen(s) => Some(*s),
            _ => None,
        })
    }

    pub fn has_overlay(&self, overlay: Overlay) -> bool {
        self.items
            .iter()
            .any(|i| matches!(i, StageItem::Overlay(o) if *o == overlay))
    }

    /// Shift every visible tracked entity horizontally.
    pub fn shift_tracked(&mut self, dx: f32) {
        for entity in self.tracked_mut().filter(|e| e.flags.visible) {
            entity.x += dx;
        }
    }

    // ── Bulk operations ──────────────────────────────────────────────────────

    /// Force-terminate every tracked entity, empty the stage and stage the
    /// new screen's items.  Returns how many entities were released.
    pub fn clear_and_stage(&mut self, new_items: Vec<StageItem>) -> usize {
        let mut released = 0;
        for entity in self.tracked_mut() {
            entity.kill();
            released += 1;
        }
        self.items.clear();
        self.suspended.clear();
        for item in new_items {
            self.add(item);
        }
        info!(released, staged = self.items.len(), "stage cleared");
        released
    }

    /// Suspend every tracked entity in place, switch off the scoreboard's
    /// pause control and put the overlays on top.
    pub fn stop_and_stage(&mut self, board: &mut Scoreboard, overlays: Vec<Overlay>) {
        let mut suspended = Vec::new();
        for entity in self.tracked_mut() {
            suspended.push((entity.id, entity.flags));
            entity.flags.animating = false;
            entity.flags.interactive = false;
        }
        self.suspended = suspended;
        board.pause_enabled = false;
        for overlay in overlays {
            self.items.push(StageItem::Overlay(overlay));
        }
        info!(suspended = self.suspended.len(), "stage stopped");
    }

    /// Resume every tracked entity exactly as it was before
    /// `stop_and_stage`, switch the pause control back on and take the
    /// overlays down.
    pub fn play_and_unstage(&mut self, board: &mut Scoreboard, overlays: &[Overlay]) {
        let suspended = std::mem::take(&mut self.suspended);
        for entity in self.tracked_mut() {
            match suspended.iter().find(|(id, _)| *id == entity.id) {
                Some((_, flags)) => entity.flags = *flags,
                None => {
                    entity.flags.animating = true;
                    entity.flags.interactive = true;
                }
            }
        }
        board.pause_enabled = true;
        self.items
            .retain(|i| !matches!(i, StageItem::Overlay(o) if overlays.contains(o)));
        info!(resumed = suspended.len(), "stage resumed");
    }
}
