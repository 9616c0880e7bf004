//! Scoped listener registrations.
//!
//! Every listener attached through a [`ListenerSet`] is detached again when
//! its feature turns off, on [`ListenerSet::clear`], or when the owning table
//! is dropped.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::host::{EventSource, Listen, ListenerId};

#[derive(Debug, Default)]
pub struct ListenerSet {
    active: BTreeMap<Listen, ListenerId>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach what `wanted` names and is missing; detach what it no longer names.
    pub fn sync(&mut self, wanted: &[Listen], source: &mut impl EventSource) -> Result<()> {
        let stale: Vec<Listen> = self
            .active
            .keys()
            .filter(|kind| !wanted.contains(*kind))
            .copied()
            .collect();
        for kind in stale {
            if let Some(id) = self.active.remove(&kind) {
                log::debug!("detach {kind:?} listener");
                source.unlisten(id);
            }
        }
        for &kind in wanted {
            if !self.active.contains_key(&kind) {
                let id = source.listen(kind)?;
                log::debug!("attach {kind:?} listener");
                self.active.insert(kind, id);
            }
        }
        Ok(())
    }

    /// Detach everything
    pub fn clear(&mut self, source: &mut impl EventSource) {
        for (kind, id) in std::mem::take(&mut self.active) {
            log::debug!("detach {kind:?} listener");
            source.unlisten(id);
        }
    }

    pub fn is_active(&self, kind: Listen) -> bool {
        self.active.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
