//! Undo/redo history over the command pattern.
//!
//! Every undoable edit goes through the history. Commands hold object ids
//! and asset names, never references, so an entry whose target is gone
//! fails cleanly instead of touching stale state.

use crate::commands::Command;

/// Undo/redo history stack.
pub struct EditHistory {
    /// Commands that can be undone
    undo_stack: Vec<Box<dyn Command>>,
    /// Commands that can be redone
    redo_stack: Vec<Box<dyn Command>>,
    /// Maximum undo depth, 0 for unbounded
    max_size: usize,
    /// Whether history has been modified since last save
    dirty: bool,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Default maximum history size.
    pub const DEFAULT_MAX_SIZE: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_SIZE)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
            dirty: false,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Change the depth limit, dropping the oldest entries if needed.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.trim();
    }

    /// Check if there are commands to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are commands to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the description of the next undo command.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Get the description of the next redo command.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark as saved (clears dirty flag).
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Push a command that has already been executed.
    ///
    /// Discards everything that could have been redone.
    pub fn push(&mut self, cmd: Box<dyn Command>) {
        self.undo_stack.push(cmd);
        self.redo_stack.clear();
        self.dirty = true;
        self.trim();
    }

    fn trim(&mut self) {
        if self.max_size == 0 || self.undo_stack.len() <= self.max_size {
            return;
        }
        let excess = self.undo_stack.len() - self.max_size;
        self.undo_stack.drain(..excess);
        log::debug!("Dropped {} oldest history entries", excess);
    }

    /// Pop a command from the undo stack.
    pub fn pop_undo(&mut self) -> Option<Box<dyn Command>> {
        let cmd = self.undo_stack.pop();
        if cmd.is_some() {
            self.dirty = true;
        }
        cmd
    }

    /// Pop a command from the redo stack.
    pub fn pop_redo(&mut self) -> Option<Box<dyn Command>> {
        let cmd = self.redo_stack.pop();
        if cmd.is_some() {
            self.dirty = true;
        }
        cmd
    }

    /// Push a command to the undo stack (for redo completion).
    pub fn push_to_undo(&mut self, cmd: Box<dyn Command>) {
        self.undo_stack.push(cmd);
        self.dirty = true;
        self.trim();
    }

    /// Push a command to the redo stack (for undo completion).
    pub fn push_to_redo(&mut self, cmd: Box<dyn Command>) {
        self.redo_stack.push(cmd);
        self.dirty = true;
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.dirty = false;
    }

    /// Get the number of commands in the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of commands in the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
