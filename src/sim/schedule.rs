//! Cancellable scheduled tasks on a virtual millisecond clock
//!
//! The engine never sleeps: the host feeds elapsed time and the scheduler
//! hands back due tasks one at a time. Cancelling removes the entry at once,
//! so a cancelled task can never be popped afterwards.

/// Work the engine defers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// One second of countdown
    CountdownTick,
    /// Prepare the next word after an answer
    AdvanceRound,
}

/// Identifies a scheduled task for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry {
    handle: TaskHandle,
    task: Task,
    due_ms: u64,
    interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn push(&mut self, task: Task, delay_ms: u64, interval_ms: Option<u64>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            task,
            due_ms: self.now_ms.saturating_add(delay_ms),
            interval_ms,
        });
        handle
    }

    /// Run `task` once, `delay_ms` from now
    pub fn schedule_once(&mut self, task: Task, delay_ms: u64) -> TaskHandle {
        self.push(task, delay_ms, None)
    }

    /// Run `task` every `interval_ms`, first firing one interval from now
    pub fn schedule_repeating(&mut self, task: Task, interval_ms: u64) -> TaskHandle {
        self.schedule_repeating_after(task, interval_ms, interval_ms)
    }

    /// Run `task` every `interval_ms`, first firing `first_delay_ms` from now
    pub fn schedule_repeating_after(
        &mut self,
        task: Task,
        first_delay_ms: u64,
        interval_ms: u64,
    ) -> TaskHandle {
        let interval_ms = interval_ms.max(1);
        self.push(task, first_delay_ms.max(1), Some(interval_ms))
    }

    /// Milliseconds until a pending task next fires
    pub fn due_in(&self, handle: TaskHandle) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.due_ms.saturating_sub(self.now_ms))
    }

    /// Cancel a task; returns false if it already ran or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn pending_len(&self) -> usize {
        self.entries.len()
    }

    /// Pop the earliest task due at or before `until_ms`.
    ///
    /// Ties go to the task scheduled first. The clock moves to the task's due
    /// time; repeating tasks are re-armed one interval later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Task> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.handle.0))
            .map(|(i, _)| i)?;

        let Entry {
            task,
            due_ms,
            interval_ms,
            ..
        } = self.entries[idx];
        self.now_ms = self.now_ms.max(due_ms);
        match interval_ms {
            Some(interval) => self.entries[idx].due_ms = due_ms.saturating_add(interval),
            None => {
                self.entries.swap_remove(idx);
            }
        }
        Some(task)
    }

    /// Move the clock forward without running anything
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_fires_at_due_time() {
        let mut sched = Scheduler::new();
        sched.schedule_once(Task::AdvanceRound, 1500);

        assert_eq!(sched.pop_due(1499), None);
        assert_eq!(sched.pop_due(1500), Some(Task::AdvanceRound));
        assert_eq!(sched.now_ms(), 1500);
        assert_eq!(sched.pop_due(10_000), None);
    }

    #[test]
    fn test_repeating_rearms() {
        let mut sched = Scheduler::new();
        sched.schedule_repeating(Task::CountdownTick, 1000);

        let mut fired = 0;
        while sched.pop_due(3500).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert_eq!(sched.pending_len(), 1);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut sched = Scheduler::new();
        let tick = sched.schedule_repeating(Task::CountdownTick, 1000);
        let advance = sched.schedule_once(Task::AdvanceRound, 1500);

        // First due task is the tick; cancelling the advance before the next
        // pop means it never comes out even though it is due.
        assert_eq!(sched.pop_due(2000), Some(Task::CountdownTick));
        assert!(sched.cancel(advance));
        assert!(!sched.cancel(advance));
        assert!(!sched.is_pending(advance));
        assert_eq!(sched.pop_due(2000), Some(Task::CountdownTick));
        assert_eq!(sched.pop_due(2000), None);

        assert!(sched.is_pending(tick));
        sched.cancel_all();
        assert_eq!(sched.pending_len(), 0);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut sched = Scheduler::new();
        sched.schedule_once(Task::AdvanceRound, 1000);
        sched.schedule_repeating(Task::CountdownTick, 1000);

        assert_eq!(sched.pop_due(1000), Some(Task::AdvanceRound));
        assert_eq!(sched.pop_due(1000), Some(Task::CountdownTick));
    }

    #[test]
    fn test_repeating_with_short_first_delay() {
        let mut sched = Scheduler::new();
        let tick = sched.schedule_repeating_after(Task::CountdownTick, 250, 1000);
        assert_eq!(sched.due_in(tick), Some(250));

        assert_eq!(sched.pop_due(249), None);
        assert_eq!(sched.pop_due(250), Some(Task::CountdownTick));
        assert_eq!(sched.due_in(tick), Some(1000));
        assert_eq!(sched.pop_due(1249), None);
        assert_eq!(sched.pop_due(1250), Some(Task::CountdownTick));

        sched.cancel(tick);
        assert_eq!(sched.due_in(tick), None);
    }

    #[test]
    fn test_far_future_delays_saturate() {
        let mut sched = Scheduler::new();
        sched.advance_to(10);
        sched.schedule_once(Task::AdvanceRound, u64::MAX);
        assert_eq!(sched.pop_due(u64::MAX - 1), None);
        assert_eq!(sched.pop_due(u64::MAX), Some(Task::AdvanceRound));
    }

    #[test]
    fn test_delays_are_relative_to_clock() {
        let mut sched = Scheduler::new();
        sched.advance_to(5000);
        sched.schedule_once(Task::AdvanceRound, 100);
        assert_eq!(sched.pop_due(5099), None);
        assert_eq!(sched.pop_due(5100), Some(Task::AdvanceRound));

        // Clock never runs backwards
        sched.advance_to(10);
        assert_eq!(sched.now_ms(), 5100);
    }
}
