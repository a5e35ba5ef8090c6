pub mod config;
pub mod crawler;
pub mod declare;
pub mod logging;
pub mod monitor;
pub mod scheduler;
pub mod util;
pub mod widget;

use crate::{monitor::Monitor, scheduler::RefreshHandle, widget::terminal::Terminal};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    logging::info_file_async(format!(
        "stockmon started. OS/Arch: {}/{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    ));

    let handle = RefreshHandle::new();
    spawn_reload_listener(handle.clone());

    let monitor = Monitor::new(Terminal::new());
    if let Err(why) = scheduler::start(monitor, handle).await {
        logging::error_file_async(format!("Failed to run the scheduler because {:?}", why));
    }
}

/// SIGHUP stands in for the host's configuration-change notification and
/// triggers an immediate refresh.
#[cfg(unix)]
fn spawn_reload_listener(handle: RefreshHandle) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(hangup) => hangup,
            Err(why) => {
                logging::error_file_async(format!("Failed to listen for SIGHUP because {:?}", why));
                return;
            }
        };

        while hangup.recv().await.is_some() {
            handle.refresh_now();
        }
    });
}

#[cfg(not(unix))]
fn spawn_reload_listener(_handle: RefreshHandle) {}
