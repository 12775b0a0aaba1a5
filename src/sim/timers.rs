//! Cancellable scheduled tasks on the game-time clock
//!
//! Replaces fire-and-forget deferred callbacks: every deferred action is an
//! explicit task that can be cancelled before it fires. All firing happens
//! inside the frame step, so tasks never race the rest of the simulation.

use super::obstacles::ObstacleId;

/// Handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What to do when a task comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Expire an obstacle that has scrolled past its useful lifetime
    RemoveObstacle(ObstacleId),
    /// Reopen the spawn gate after the current spawn interval
    ReopenSpawnGate,
}

#[derive(Debug, Clone)]
struct Task {
    id: TimerId,
    due_ms: f64,
    action: TimerAction,
}

/// Pending deferred work, ordered by due time
#[derive(Debug, Default)]
pub struct Timers {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once `now_ms` reaches `due_ms`
    pub fn schedule(&mut self, due_ms: f64, action: TimerAction) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task { id, due_ms, action });
        id
    }

    /// Cancel a pending task. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Remove and return every task due at `now_ms`, in due order
    /// (scheduling order breaks ties).
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<TimerAction> {
        let mut due: Vec<Task> = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due_ms <= now_ms {
                due.push(self.tasks.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| {
            a.due_ms
                .partial_cmp(&b.due_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.0.cmp(&b.id.0))
        });
        due.into_iter().map(|t| t.action).collect()
    }

    /// Number of tasks still pending
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}
