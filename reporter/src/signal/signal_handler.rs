use std::process;

use log::warn;
use pgtabsz_core::Context;
#[cfg(windows)]
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

/// Cancels `ctx` on the first SIGINT/SIGTERM, exits on the second.
pub async fn notify_on_signals(ctx: Context) {
    #[cfg(unix)]
    {
        let (mut sigterm, mut sigint) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to set up signal handlers: {}", e);
                return;
            }
        };
        loop {
            tokio::select! {
                _ = sigint.recv() => {
                    exit(&ctx, "SIGINT");
                },
                _ = sigterm.recv() => {
                    exit(&ctx, "SIGTERM");
                },
            }
        }
    }
    #[cfg(windows)]
    {
        while ctrl_c().await.is_ok() {
            exit(&ctx, "Ctrl+C");
        }
    }
}

fn exit(ctx: &Context, signal: &str) {
    if ctx.is_cancelled() {
        warn!("{} received, terminating...", signal);
        process::exit(1);
    }
    warn!("{} received, cancelling... (repeat for forced close)", signal);
    ctx.cancel();
}
