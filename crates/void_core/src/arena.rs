//! Arena - Generational index-based storage
//!
//! O(1) insertion, removal, and lookup with use-after-free detection.
//! Removed values can be put back under their original id as long as the
//! slot has not been reused. An append-only arena never reuses a slot, so a
//! removed value can always come back, however many removals happened since.

use crate::id::ObjectId;

/// Slot entry
struct Slot<T> {
    value: Option<T>,
    generation: u32,
}

/// Generational storage keyed by [`ObjectId`]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    len: usize,
    reuse_slots: bool,
}

impl<T> Arena<T> {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            reuse_slots: true,
        }
    }

    /// Create an arena that never hands out a freed slot again.
    ///
    /// Every removed id stays restorable for the lifetime of the arena.
    pub fn append_only() -> Self {
        Self {
            reuse_slots: false,
            ..Self::new()
        }
    }

    /// Insert a value and get its id
    pub fn insert(&mut self, value: T) -> ObjectId {
        self.len += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            ObjectId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                value: Some(value),
                generation: 0,
            });
            ObjectId::new(index, 0)
        }
    }

    /// Remove a value by id
    pub fn remove(&mut self, id: ObjectId) -> Option<T> {
        let slot = self.slots.get_mut(id.index() as usize)?;

        if slot.generation != id.generation() || slot.value.is_none() {
            return None;
        }

        slot.generation = slot.generation.wrapping_add(1);
        if self.reuse_slots {
            self.free_list.push(id.index());
        }
        self.len -= 1;

        slot.value.take()
    }

    /// Put a previously removed value back under its original id.
    ///
    /// Fails (handing the value back) when the slot has been reused since
    /// the removal, or when the id was never removed.
    pub fn restore(&mut self, id: ObjectId, value: T) -> Result<(), T> {
        let Some(slot) = self.slots.get_mut(id.index() as usize) else {
            return Err(value);
        };

        if slot.value.is_some() || slot.generation != id.generation().wrapping_add(1) {
            return Err(value);
        }

        slot.generation = id.generation();
        slot.value = Some(value);
        self.free_list.retain(|&index| index != id.index());
        self.len += 1;
        Ok(())
    }

    /// Get a reference to a value
    pub fn get(&self, id: ObjectId) -> Option<&T> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    /// Get a mutable reference to a value
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    /// Check if an id is live
    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clear all elements, invalidating every outstanding id
    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.is_some() {
                slot.value = None;
                slot.generation = slot.generation.wrapping_add(1);
                if self.reuse_slots {
                    self.free_list.push(i as u32);
                }
            }
        }
        self.len = 0;
    }

    /// Iterate over all live values in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|v| (ObjectId::new(i as u32, slot.generation), v))
        })
    }

    /// Iterate over all live values mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let gen = slot.generation;
            slot.value.as_mut().map(|v| (ObjectId::new(i as u32, gen), v))
        })
    }

    /// Iterate over ids only
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.iter().map(|(id, _)| id)
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
