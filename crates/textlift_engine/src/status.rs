use std::sync::{Arc, Mutex};

use textlift_core::{status, ProgressEvent, ProgressMapper, RunPhase};
use tokio::sync::watch;

use crate::ProgressSink;

/// Latest phase and status line of a run. Single slot: readers only ever
/// see the most recent value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunStatus {
    pub phase: RunPhase,
    pub line: String,
}

pub struct StatusPublisher {
    tx: watch::Sender<RunStatus>,
    mapper: Mutex<ProgressMapper>,
}

impl StatusPublisher {
    pub fn channel() -> (Arc<Self>, watch::Receiver<RunStatus>) {
        let (tx, rx) = watch::channel(RunStatus::default());
        let publisher = Self {
            tx,
            mapper: Mutex::new(ProgressMapper::new()),
        };
        (Arc::new(publisher), rx)
    }

    pub fn current(&self) -> RunStatus {
        self.tx.borrow().clone()
    }

    pub fn set_phase(&self, phase: RunPhase) {
        self.tx.send_modify(|current| current.phase = phase);
    }

    pub fn set_line(&self, line: String) {
        self.tx.send_modify(|current| current.line = line);
    }

    /// Enter `Processing` for item `index` (1-based) and reset the progress floor.
    pub fn start_item(&self, index: usize, total: usize, name: &str) {
        if let Ok(mut mapper) = self.mapper.lock() {
            mapper.start_item();
        }
        self.tx.send_modify(|current| {
            current.phase = RunPhase::Processing { index, total };
            current.line = status::analyzing(index, total, name);
        });
    }
}

impl ProgressSink for StatusPublisher {
    fn emit(&self, event: ProgressEvent) {
        let line = match self.mapper.lock() {
            Ok(mut mapper) => mapper.status_line(&event),
            Err(_) => None,
        };
        if let Some(line) = line {
            self.set_line(line);
        }
    }
}
