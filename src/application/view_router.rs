// Tracks the active dashboard section
use crate::domain::section::Section;

/// Ticket for a deferred section load. Stale tickets are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLoad {
    pub section: Section,
    pub epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Section,
    pub to: Section,
    pub load: PendingLoad,
}

#[derive(Debug, Clone)]
pub struct ViewRouter {
    active: Section,
    epoch: u64,
}

impl ViewRouter {
    pub fn new(initial: Section) -> Self {
        Self {
            active: initial,
            epoch: 0,
        }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    /// Make `section` active. Re-selecting the active section still yields a
    /// fresh load so its charts are rebuilt.
    pub fn activate(&mut self, section: Section) -> Transition {
        let from = self.active;
        self.active = section;
        self.epoch += 1;
        Transition {
            from,
            to: section,
            load: PendingLoad {
                section,
                epoch: self.epoch,
            },
        }
    }

    /// A load is current only if no navigation happened after it was issued.
    pub fn is_current(&self, load: &PendingLoad) -> bool {
        load.epoch == self.epoch && load.section == self.active
    }
}
