//! Frame-boundary coalescing of layout requests.
//!
//! A UI that recomputes on every keystroke schedules its layouts instead of
//! running them inline. Requests made before the next frame replace each
//! other, so only the newest data set is laid out. Stopping drops pending work
//! for good.

use halo_core::semantic::GraphData;

#[derive(Debug, Default)]
pub(crate) struct FrameScheduler {
    pending: Option<GraphData>,
    stopped: bool,
}

impl FrameScheduler {
    /// Queue `data` for the next frame.
    ///
    /// Returns `true` when an earlier pending request was replaced, and drops
    /// the request once stopped.
    pub(crate) fn schedule(&mut self, data: GraphData) -> bool {
        if self.stopped {
            return false;
        }
        self.pending.replace(data).is_some()
    }

    /// Take the pending request, if any.
    pub(crate) fn take(&mut self) -> Option<GraphData> {
        if self.stopped {
            return None;
        }
        self.pending.take()
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop pending work and refuse all later requests.
    ///
    /// Returns `true` on the first call only.
    pub(crate) fn stop(&mut self) -> bool {
        self.pending = None;
        !std::mem::replace(&mut self.stopped, true)
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[cfg(test)]
mod tests {
    use halo_core::semantic::{GraphNode, NodeGroup};

    use super::*;

    fn data(central: &str) -> GraphData {
        GraphData::default().with_node(GraphNode::new(central, NodeGroup::Central))
    }

    #[test]
    fn test_newer_request_replaces_pending() {
        let mut scheduler = FrameScheduler::default();
        assert!(!scheduler.schedule(data("first")));
        assert!(scheduler.schedule(data("second")));
        assert!(scheduler.has_pending());

        let taken = scheduler.take().unwrap();
        assert_eq!(taken.nodes()[0].id(), "second");
        assert!(!scheduler.has_pending());
        assert!(scheduler.take().is_none());
    }

    #[test]
    fn test_stop_drops_pending_and_is_idempotent() {
        let mut scheduler = FrameScheduler::default();
        scheduler.schedule(data("word"));

        assert!(scheduler.stop());
        assert!(!scheduler.stop());
        assert!(scheduler.is_stopped());
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_no_work_after_stop() {
        let mut scheduler = FrameScheduler::default();
        scheduler.stop();

        assert!(!scheduler.schedule(data("late")));
        assert!(!scheduler.has_pending());
        assert!(scheduler.take().is_none());
    }
}
