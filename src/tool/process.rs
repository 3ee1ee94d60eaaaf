//! Child process termination

use std::time::Duration;
use tokio::process::Child;
use tracing::debug;

/// How long a child gets to exit after SIGTERM before it is killed
const TERMINATE_GRACE: Duration = Duration::from_secs(2);

/// Ask the child to exit, then force-kill it and reap it
///
/// On unix the child first receives SIGTERM and gets [`TERMINATE_GRACE`] to
/// exit; a process that is still alive after that is killed. Errors are
/// logged and swallowed: the child may already have exited on its own.
pub(crate) async fn terminate_child(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        // SAFETY: kill(2) only sends a signal; `pid` was handed out by the OS for
        // this child, which has not been reaped yet because we still own it.
        let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
        if rc != 0 {
            debug!(
                pid,
                error = %std::io::Error::last_os_error(),
                "SIGTERM failed"
            );
        } else if let Ok(status) = tokio::time::timeout(TERMINATE_GRACE, child.wait()).await {
            debug!(pid, status = ?status, "child exited after SIGTERM");
            return;
        }
    }

    if let Err(e) = child.kill().await {
        debug!(error = %e, "failed to kill child process");
    }
}
