//! Availability monitoring.
//!
//! Probes a vendor until it is reachable and accepting requests, then
//! submits a file. Useful when a vendor account is provisioned but the
//! service comes and goes.

use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use affect_models::JobId;

use crate::error::{ClientError, ClientResult};
use crate::vendor::Vendor;

/// Monitoring parameters.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Sleep between availability checks
    pub check_interval: Duration,
    /// Give up after this many checks; `None` keeps checking forever
    pub max_checks: Option<u32>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(300),
            max_checks: None,
        }
    }
}

/// Wraps a vendor client with automated availability checking.
pub struct Monitor<'a> {
    vendor: &'a dyn Vendor,
    config: MonitorConfig,
}

impl<'a> Monitor<'a> {
    pub fn new(vendor: &'a dyn Vendor, config: MonitorConfig) -> Self {
        Self { vendor, config }
    }

    /// Single probe-and-submit attempt.
    pub async fn run_once(&self, file: &Path) -> ClientResult<JobId> {
        if !self.vendor.healthy().await {
            return Err(ClientError::ServiceUnavailable(format!(
                "{} is not reachable",
                self.vendor.kind().display_name()
            )));
        }
        self.vendor.submit(file).await
    }

    /// Keep checking until a submission succeeds or `max_checks` runs out.
    ///
    /// `on_check` is called with the 1-based check count before each
    /// attempt. Non-retryable submission errors (bad input file) end the
    /// loop immediately.
    pub async fn run_until_submitted(
        &self,
        file: &Path,
        mut on_check: Option<&mut dyn FnMut(u32)>,
    ) -> ClientResult<JobId> {
        let mut checks = 0u32;

        loop {
            checks += 1;
            if let Some(max) = self.config.max_checks {
                if checks > max {
                    return Err(ClientError::ServiceUnavailable(format!(
                        "gave up after {} availability checks",
                        max
                    )));
                }
            }

            if let Some(on_check) = on_check.as_deref_mut() {
                on_check(checks);
            }

            match self.run_once(file).await {
                Ok(job_id) => {
                    info!(job_id = %job_id, "submitted after {} check(s)", checks);
                    return Ok(job_id);
                }
                Err(e) if e.is_retryable() => {
                    warn!("check {} failed: {}", checks, e);
                    tokio::time::sleep(self.config.check_interval).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
