//! In-process periodic task runner.
//!
//! Replaces an OS job scheduler with a simple tick loop: named periodic
//! tasks with a keep-or-replace registration policy, plus one-shot jobs.
//! A job that returns [`TaskOutcome::Retry`] is rescheduled with an
//! exponentially growing delay, capped at the task's own interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

/// What a job run reports back to the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Work done; schedule the next regular run.
    Success,
    /// Transient failure; run again sooner with backoff.
    Retry,
    /// Permanent failure; schedule the next regular run anyway.
    Failure,
}

/// What to do when registering a periodic task whose name already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingTaskPolicy {
    /// Leave the existing registration untouched.
    Keep,
    /// Drop the existing registration and install the new one.
    Replace,
}

/// A schedulable unit of work.
pub type Job = Box<dyn FnMut() -> TaskOutcome + Send>;

const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(30);

struct PeriodicTask {
    name: String,
    interval: Duration,
    next_run: Instant,
    retry_delay: Duration,
    job: Job,
}

struct OneShot {
    due: Instant,
    job: Job,
}

/// Tick-driven scheduler for periodic and one-shot jobs.
pub struct TaskScheduler {
    periodic: Vec<PeriodicTask>,
    one_shots: Vec<OneShot>,
    tick: Duration,
    initial_retry_delay: Duration,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self {
            periodic: Vec::new(),
            one_shots: Vec::new(),
            tick: Duration::from_millis(250),
            initial_retry_delay: INITIAL_RETRY_DELAY,
        }
    }

    /// Override the first retry delay. Mainly for tests and short-lived
    /// runs.
    pub fn set_initial_retry_delay(&mut self, delay: Duration) {
        self.initial_retry_delay = delay;
    }

    /// Register a named periodic task. The first run happens on the next
    /// tick, not after one interval. Returns `false` if an existing task
    /// with the same name was kept.
    pub fn register_periodic(
        &mut self,
        name: &str,
        interval: Duration,
        policy: ExistingTaskPolicy,
        job: Job,
    ) -> bool {
        if self.periodic.iter().any(|t| t.name == name) {
            match policy {
                ExistingTaskPolicy::Keep => {
                    debug!("periodic task {name} already registered, keeping existing");
                    return false;
                }
                ExistingTaskPolicy::Replace => {
                    self.periodic.retain(|t| t.name != name);
                }
            }
        }
        self.periodic.push(PeriodicTask {
            name: name.to_string(),
            interval,
            next_run: Instant::now(),
            retry_delay: self.initial_retry_delay,
            job,
        });
        true
    }

    /// Queue a job for a single immediate run.
    pub fn enqueue_one_shot(&mut self, job: Job) {
        self.one_shots.push(OneShot {
            due: Instant::now(),
            job,
        });
    }

    /// Names of currently registered periodic tasks.
    pub fn periodic_task_names(&self) -> Vec<String> {
        self.periodic.iter().map(|t| t.name.clone()).collect()
    }

    /// Run until `running` is cleared (typically by a signal handler).
    pub fn run(&mut self, running: &AtomicBool) {
        while running.load(Ordering::SeqCst) {
            self.run_pending();
            std::thread::sleep(self.tick);
        }
        info!("scheduler stopping");
    }

    /// Run everything that is due right now. Public so short-lived
    /// callers and tests can drive the scheduler without the loop.
    pub fn run_pending(&mut self) {
        let now = Instant::now();

        // Pull due one-shots out first so a Retry re-enqueue is not
        // picked up again in the same pass.
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.one_shots.len() {
            if self.one_shots[i].due <= now {
                due.push(self.one_shots.remove(i));
            } else {
                i += 1;
            }
        }
        for mut shot in due {
            if (shot.job)() == TaskOutcome::Retry {
                warn!("one-shot job asked for retry");
                shot.due = Instant::now() + self.initial_retry_delay;
                self.one_shots.push(shot);
            }
        }

        for task in &mut self.periodic {
            if task.next_run > now {
                continue;
            }
            match (task.job)() {
                TaskOutcome::Retry => {
                    warn!(
                        "periodic task {} retrying in {:?}",
                        task.name, task.retry_delay
                    );
                    task.next_run = Instant::now() + task.retry_delay;
                    task.retry_delay = (task.retry_delay * 2).min(task.interval);
                }
                outcome => {
                    if outcome == TaskOutcome::Failure {
                        warn!("periodic task {} failed permanently this run", task.name);
                    }
                    task.next_run = Instant::now() + task.interval;
                    task.retry_delay = self.initial_retry_delay;
                }
            }
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}
