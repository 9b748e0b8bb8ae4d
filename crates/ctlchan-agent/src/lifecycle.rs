use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{AgentError, Result};

/// The two opaque lifecycle operations for the resident service.
///
/// Activation must leave the channel node ready for round trips;
/// deactivation must take the service down again. Everything in between is
/// outside this trait.
pub trait ServiceLifecycle {
    fn activate(&mut self) -> Result<()>;
    fn deactivate(&mut self) -> Result<()>;
}

/// Runs the service module as a child process.
///
/// Activation spawns `<module> serve <node-path>` and waits for the node to
/// appear. Deactivation delivers SIGTERM and waits for the child to exit,
/// escalating to SIGKILL if it lingers.
pub struct ModuleProcess {
    module: PathBuf,
    node_path: PathBuf,
    startup_timeout: Duration,
    shutdown_timeout: Duration,
    child: Option<Child>,
}

impl ModuleProcess {
    const POLL_INTERVAL: Duration = Duration::from_millis(25);

    pub fn new(module: impl Into<PathBuf>, node_path: impl Into<PathBuf>) -> Self {
        Self {
            module: module.into(),
            node_path: node_path.into(),
            startup_timeout: Duration::from_secs(5),
            shutdown_timeout: Duration::from_secs(5),
            child: None,
        }
    }

    /// Override the activation and deactivation timeouts.
    pub fn with_timeouts(mut self, startup: Duration, shutdown: Duration) -> Self {
        self.startup_timeout = startup;
        self.shutdown_timeout = shutdown;
        self
    }

    /// The module executable path.
    pub fn module(&self) -> &Path {
        &self.module
    }

    fn activation_error(&self, reason: impl Into<String>) -> AgentError {
        AgentError::Activation {
            module: self.module.clone(),
            reason: reason.into(),
        }
    }

    fn reap(child: &mut Child) {
        let _ = child.kill();
        let _ = child.wait();
    }
}

impl ServiceLifecycle for ModuleProcess {
    fn activate(&mut self) -> Result<()> {
        info!(module = ?self.module, node = ?self.node_path, "activating service module");

        let child = Command::new(&self.module)
            .arg("serve")
            .arg(&self.node_path)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|err| self.activation_error(format!("spawn failed: {err}")))?;
        self.child = Some(child);

        let deadline = Instant::now() + self.startup_timeout;
        loop {
            if self.node_path.exists() {
                debug!(node = ?self.node_path, "channel node is up");
                return Ok(());
            }

            let child = self.child.as_mut().unwrap();
            if let Ok(Some(status)) = child.try_wait() {
                self.child = None;
                return Err(self.activation_error(format!("module exited during startup: {status}")));
            }

            if Instant::now() >= deadline {
                let mut child = self.child.take().unwrap();
                Self::reap(&mut child);
                return Err(self.activation_error(format!(
                    "channel node did not appear within {:?}",
                    self.startup_timeout
                )));
            }

            std::thread::sleep(Self::POLL_INTERVAL);
        }
    }

    fn deactivate(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Err(AgentError::Deactivation {
                reason: "service module is not active".into(),
            });
        };

        info!(module = ?self.module, "deactivating service module");

        let pid = child.id() as libc::pid_t;
        // SAFETY: pid refers to a child we spawned and have not reaped.
        let rc = unsafe { libc::kill(pid, libc::SIGTERM) };
        if rc != 0 {
            let err = std::io::Error::last_os_error();
            Self::reap(&mut child);
            return Err(AgentError::Deactivation {
                reason: format!("SIGTERM delivery failed: {err}"),
            });
        }

        let deadline = Instant::now() + self.shutdown_timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!(%status, "service module exited");
                    return Ok(());
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        warn!("service module ignored SIGTERM; escalating to SIGKILL");
                        Self::reap(&mut child);
                        return Ok(());
                    }
                    std::thread::sleep(Self::POLL_INTERVAL);
                }
                Err(err) => {
                    Self::reap(&mut child);
                    return Err(AgentError::Deactivation {
                        reason: format!("wait failed: {err}"),
                    });
                }
            }
        }
    }
}

impl Drop for ModuleProcess {
    fn drop(&mut self) {
        // Never leak a resident service past the agent's lifetime.
        if let Some(mut child) = self.child.take() {
            warn!(module = ?self.module, "service module still active on drop; killing");
            Self::reap(&mut child);
        }
    }
}
