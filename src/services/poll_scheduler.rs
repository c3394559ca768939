use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::services::view::DashboardView;

/// Owns one independently timed polling loop per registered stream.
///
/// Timers are fully independent: a slow or failing stream never delays
/// another's schedule. Each tick's fetch runs as its own task, so a fetch
/// outlasting its interval overlaps the next attempt instead of delaying
/// it (an accepted race; the store applies whichever completes last).
/// Dropping the scheduler or calling [`shutdown`](Self::shutdown) cancels
/// every timer; fetches already in flight are left to resolve and are
/// discarded by the store's liveness check.
pub struct PollScheduler {
    tasks: Vec<JoinHandle<()>>,
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PollScheduler {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Spawns a polling loop firing every `every`, starting immediately.
    /// Ticks where `is_active` returns false are skipped entirely: no
    /// fetch, no state change.
    ///
    /// When `reactivation` is given, a view switch wakes the loop between
    /// ticks; it fetches right away only if no attempt has succeeded yet
    /// (`fetch` reports success through its returned bool).
    pub fn spawn_stream<P, F, Fut>(
        &mut self,
        name: &'static str,
        every: Duration,
        is_active: P,
        reactivation: Option<watch::Receiver<DashboardView>>,
        fetch: F,
    ) where
        P: Fn() -> bool + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        debug!("scheduling {} every {:?}", name, every);
        self.tasks
            .push(tokio::spawn(poll_loop(name, every, is_active, reactivation, fetch)));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Cancels all timers; no further fetches are issued.
    pub fn shutdown(&mut self) {
        info!("🛑 stopping {} polling task(s)", self.tasks.len());
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn poll_loop<P, F, Fut>(
    name: &'static str,
    every: Duration,
    is_active: P,
    reactivation: Option<watch::Receiver<DashboardView>>,
    fetch: F,
) where
    P: Fn() -> bool + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    let succeeded = Arc::new(AtomicBool::new(false));
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    if let Some(mut rx) = reactivation {
        loop {
            tokio::select! {
                _ = interval.tick() => tick(name, &is_active, &fetch, &succeeded),
                changed = rx.changed() => match changed {
                    Ok(()) => {
                        // A switch into the gated view warrants an immediate
                        // attempt only while the stream has never succeeded;
                        // otherwise the regular cadence resumes on its own.
                        if is_active() && !succeeded.load(Ordering::Relaxed) {
                            debug!("{}: view activated before first success, fetching now", name);
                            launch(&fetch, &succeeded);
                        }
                    }
                    // Selector dropped; interval ticks are all that is left.
                    Err(_) => break,
                },
            }
        }
    }

    loop {
        interval.tick().await;
        tick(name, &is_active, &fetch, &succeeded);
    }
}

fn tick<P, F, Fut>(name: &'static str, is_active: &P, fetch: &F, succeeded: &Arc<AtomicBool>)
where
    P: Fn() -> bool,
    F: Fn() -> Fut,
    Fut: Future<Output = bool> + Send + 'static,
{
    if !is_active() {
        debug!("{}: inactive, tick skipped", name);
        return;
    }
    launch(fetch, succeeded);
}

fn launch<F, Fut>(fetch: &F, succeeded: &Arc<AtomicBool>)
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool> + Send + 'static,
{
    let succeeded = succeeded.clone();
    let attempt = fetch();
    tokio::spawn(async move {
        if attempt.await {
            succeeded.store(true, Ordering::Relaxed);
        }
    });
}
