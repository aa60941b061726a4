//! Independently tracked background work.
//!
//! A [`TaskGroup`] owns a batch of per-item futures. Each item's failure is
//! caught and reported on its own, so one failing item never stops its
//! siblings, and the caller can hand the whole group to a spawner without
//! waiting for it.

use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::task::{LocalFutureObj, LocalSpawn, LocalSpawnExt, SpawnError};
use futures::FutureExt;
use std::fmt::Display;
use std::future::Future;

use super::error::ActionError;
use super::monitoring;

/// Runs futures on the browser event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}

/// What happened to every item of a finished group.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport<K> {
    pub completed: Vec<K>,
    pub failed: Vec<(K, ActionError)>,
}

pub struct TaskGroup<K> {
    label: &'static str,
    tag: &'static str,
    tasks: FuturesUnordered<LocalBoxFuture<'static, (K, Result<(), ActionError>)>>,
}

impl<K> TaskGroup<K>
where
    K: Display + Clone + 'static,
{
    /// `label` is the message failures are reported under and `tag` the
    /// context key each item's key is reported as.
    pub fn new(label: &'static str, tag: &'static str) -> Self {
        Self {
            label,
            tag,
            tasks: FuturesUnordered::new(),
        }
    }

    pub fn push<F>(&mut self, key: K, task: F)
    where
        F: Future<Output = Result<(), ActionError>> + 'static,
    {
        self.tasks.push(task.map(move |result| (key, result)).boxed_local());
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drive every item to completion, in whatever order they finish.
    pub async fn join(mut self) -> TaskReport<K> {
        let mut report = TaskReport { completed: Vec::new(), failed: Vec::new() };

        while let Some((key, result)) = self.tasks.next().await {
            match result {
                Ok(()) => report.completed.push(key),
                Err(e) => {
                    monitoring::report_error(self.label, &e, &[(self.tag, &key.to_string())]);
                    report.failed.push((key, e));
                }
            }
        }

        report
    }

    /// Hand the group to `spawner` and return immediately.
    pub fn spawn_detached(self, spawner: &dyn LocalSpawn) -> Result<(), ActionError> {
        if self.is_empty() {
            return Ok(());
        }
        let label = self.label;
        log::debug!("{}: scheduling {} tasks", label, self.len());
        spawner.spawn_local(async move {
            let report = self.join().await;
            log::debug!(
                "{}: {} completed, {} failed",
                label,
                report.completed.len(),
                report.failed.len()
            );
        })?;
        Ok(())
    }
}
