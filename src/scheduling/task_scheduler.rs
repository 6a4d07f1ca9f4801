use std::time::Duration;

use chrono::{DateTime, TimeZone};

use crate::scheduling::schedule::Schedule;
use crate::scheduling::types::TaskKind;

#[derive(Debug, Clone)]
pub struct ScheduledTask<Tz: TimeZone> {
    pub kind: TaskKind,
    pub schedule: Schedule,
    pub next_run: DateTime<Tz>,
}

/// Timer-free task table. The caller supplies `now`, sleeps for
/// [`idle_duration`](Self::idle_duration) and runs whatever
/// [`take_due`](Self::take_due) returns.
#[derive(Debug, Clone)]
pub struct TaskScheduler<Tz: TimeZone> {
    tasks: Vec<ScheduledTask<Tz>>,
}

impl<Tz: TimeZone> Default for TaskScheduler<Tz> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<Tz: TimeZone> TaskScheduler<Tz> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: TaskKind, schedule: Schedule, now: &DateTime<Tz>) {
        let next_run = schedule.next_after(now);
        tracing::info!(task = %kind, next_run = %next_run.naive_local(), "task scheduled");

        self.tasks.push(ScheduledTask {
            kind,
            schedule,
            next_run,
        });
    }

    #[cfg(test)]
    pub fn tasks(&self) -> &[ScheduledTask<Tz>] {
        &self.tasks
    }

    /// Time until the earliest task is due; zero when one is overdue, `None` when empty.
    pub fn idle_duration(&self, now: &DateTime<Tz>) -> Option<Duration> {
        self.tasks
            .iter()
            .map(|task| {
                task.next_run
                    .clone()
                    .signed_duration_since(now.clone())
                    .to_std()
                    .unwrap_or(Duration::ZERO)
            })
            .min()
    }

    /// Due tasks in registration order. Each is rescheduled relative to `now`.
    pub fn take_due(&mut self, now: &DateTime<Tz>) -> Vec<TaskKind> {
        let mut due = Vec::new();

        for task in self.tasks.iter_mut() {
            if task.next_run <= *now {
                due.push(task.kind);
                task.next_run = task.schedule.next_after(now);
            }
        }

        due
    }
}
