use std::{sync::Arc, time::Duration};

use anyhow::Result;
use tokio::{
    sync::Notify,
    time::{self, Instant},
};

use crate::{config, logging, monitor::Monitor, widget::DisplayHost};

/// Wakes the scheduler for an immediate refresh, e.g. after a configuration
/// change notification. Clone freely; every clone wakes the same loop.
#[derive(Clone)]
pub struct RefreshHandle {
    notify: Arc<Notify>,
}

impl RefreshHandle {
    pub fn new() -> Self {
        RefreshHandle {
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn refresh_now(&self) {
        self.notify.notify_one();
    }
}

impl Default for RefreshHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the tick loop: one refresh immediately, then one per period, plus one
/// for every wake on `handle`. Both paths funnel through the same
/// [`Monitor::refresh`] entry point. Ticks execute sequentially on this task,
/// so a slow fetch from an earlier tick can never overwrite a later tick's
/// result. Returns after ctrl-c, disposing every display item.
pub async fn start<H: DisplayHost>(mut monitor: Monitor<H>, handle: RefreshHandle) -> Result<()> {
    let period = config::Monitor::load().refresh_in_seconds.max(1);
    let mut task_interval = time::interval_at(Instant::now(), Duration::from_secs(period));

    loop {
        tokio::select! {
            _ = task_interval.tick() => monitor.refresh().await,
            _ = handle.notify.notified() => monitor.refresh().await,
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    monitor.teardown();
    logging::info_file_async("stockmon stopped".to_string());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refresh_handle_wakes_waiter() {
        let handle = RefreshHandle::new();
        let waker = handle.clone();

        // notify_one stores a permit, so the later notified() resolves at once
        waker.refresh_now();
        handle.notify.notified().await;
    }
}
