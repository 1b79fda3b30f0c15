use std::fmt;

use super::{Mode, ModeKind};

/// Last-in, first-out stack of active modes. Only the top receives input.
#[derive(Default)]
pub struct ModeStack {
    modes: Vec<Box<dyn Mode>>,
}

impl ModeStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mode: Box<dyn Mode>) {
        self.modes.push(mode);
    }

    pub fn pop(&mut self) -> Option<Box<dyn Mode>> {
        self.modes.pop()
    }

    /// Swap the top mode for `mode`, pushing if the stack is empty.
    pub fn replace(&mut self, mode: Box<dyn Mode>) -> Option<Box<dyn Mode>> {
        let previous = self.modes.pop();
        self.modes.push(mode);
        previous
    }

    /// Drop every mode and start again from `mode`.
    pub fn reset(&mut self, mode: Box<dyn Mode>) {
        self.modes.clear();
        self.modes.push(mode);
    }

    #[must_use]
    pub fn top(&self) -> Option<&dyn Mode> {
        self.modes.last().map(|mode| &**mode)
    }

    pub fn top_mut(&mut self) -> Option<&mut (dyn Mode + 'static)> {
        self.modes.last_mut().map(|mode| &mut **mode)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Kinds from bottom to top.
    #[must_use]
    pub fn kinds(&self) -> Vec<ModeKind> {
        self.modes.iter().map(|mode| mode.kind()).collect()
    }
}

impl fmt::Debug for ModeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeStack")
            .field("modes", &self.kinds())
            .finish()
    }
}
