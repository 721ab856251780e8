//! Mock interrupt router implementation for testing

use core::cell::RefCell;

use heapless::Vec;

use crate::platform::traits::{InterruptRouter, IrqLine, IrqPriority, TimerId};

const MAX_ROUTES: usize = 8;
const MAX_INSTALLS: usize = 16;

/// Mock interrupt router
///
/// Holds a static timer-to-line table and records every `install` call.
/// Timers without a route resolve to `None`, which is how tests exercise
/// the driver's silent-skip path.
#[derive(Debug, Default)]
pub struct MockInterruptRouter {
    routes: Vec<(TimerId, IrqLine), MAX_ROUTES>,
    installed: RefCell<Vec<(IrqLine, IrqPriority), MAX_INSTALLS>>,
}

impl MockInterruptRouter {
    /// Create a router with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a timer to an interrupt line. Routes beyond the table capacity
    /// are dropped.
    pub fn add_route(&mut self, timer: TimerId, line: IrqLine) {
        let _ = self.routes.push((timer, line));
    }

    /// Number of `install` calls observed.
    pub fn install_count(&self) -> usize {
        self.installed.borrow().len()
    }

    /// Most recent `install` call, if any.
    pub fn last_install(&self) -> Option<(IrqLine, IrqPriority)> {
        self.installed.borrow().last().copied()
    }
}

impl InterruptRouter for MockInterruptRouter {
    fn line_for(&self, timer: TimerId) -> Option<IrqLine> {
        self.routes
            .iter()
            .find(|(id, _)| *id == timer)
            .map(|(_, line)| *line)
    }

    fn install(&self, line: IrqLine, priority: IrqPriority) {
        let _ = self.installed.borrow_mut().push((line, priority));
    }
}
