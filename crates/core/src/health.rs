//! Health check system for verifying tool dependencies and environment
//!
//! Checks the tools an Android build needs (JDK, keytool, Gradle), the
//! `ANDROID_HOME` environment, and the project's Gradle wrapper.

use crate::process::{command_exists, run_command, which_command};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All checks passed
    Healthy,
    /// Some optional checks failed
    Degraded,
    /// Required checks failed
    Unhealthy,
    /// Status could not be determined
    Unknown,
}

impl HealthStatus {
    /// Returns true if status is healthy
    #[must_use] pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Returns true if status is healthy or degraded (still operational)
    #[must_use] pub fn is_operational(&self) -> bool {
        matches!(self, HealthStatus::Healthy | HealthStatus::Degraded)
    }
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,
    /// Status of the check
    pub status: HealthStatus,
    /// Optional message with details
    pub message: Option<String>,
    /// Duration of the check in milliseconds
    pub duration_ms: u64,
    /// Additional details as key-value pairs
    pub details: HashMap<String, String>,
}

impl CheckResult {
    /// Create a healthy check result
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Healthy,
            message: None,
            duration_ms: 0,
            details: HashMap::new(),
        }
    }

    /// Create an unhealthy check result with a message
    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            duration_ms: 0,
            details: HashMap::new(),
        }
    }

    /// Create a degraded check result with a message
    pub fn degraded(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Degraded,
            message: Some(message.into()),
            duration_ms: 0,
            details: HashMap::new(),
        }
    }

    /// Set the duration of the check
    #[must_use] pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    /// Add a detail key-value pair
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Overall health report containing all check results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall status based on all checks
    pub status: HealthStatus,
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Total duration of all checks in milliseconds
    pub total_duration_ms: u64,
    /// Timestamp when the report was generated
    pub timestamp: String,
    /// Version of the tool
    pub version: String,
}

impl HealthReport {
    /// Create a new health report from check results
    #[must_use] pub fn new(checks: Vec<CheckResult>, duration: Duration) -> Self {
        let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            checks,
            total_duration_ms: duration.as_millis() as u64,
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Returns true if overall status is healthy
    #[must_use] pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }

    /// Get all checks that failed (not healthy)
    #[must_use] pub fn failed_checks(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| !c.status.is_healthy())
            .collect()
    }
}

/// Health checker with configurable checks
pub struct HealthChecker {
    checks: Vec<Box<dyn HealthCheck>>,
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthChecker {
    /// Create a new health checker with no checks
    #[must_use] pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a health check
    pub fn add_check(mut self, check: impl HealthCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Add the checks an Android build environment needs
    #[must_use] pub fn with_android_checks(self) -> Self {
        self.add_check(CommandCheck::new("java", Some("--version")))
            .add_check(EnvVarCheck::new("ANDROID_HOME"))
            .add_check(CommandCheck::optional("keytool", None))
            .add_check(CommandCheck::optional("gradle", Some("--version")))
    }

    /// Add a check for the project's Gradle wrapper script
    #[must_use] pub fn with_wrapper_check(self, project_dir: &Path) -> Self {
        let wrapper = if cfg!(windows) { "gradlew.bat" } else { "gradlew" };
        self.add_check(PathCheck::readable(
            project_dir.join(wrapper).display().to_string(),
        ))
    }

    /// Run all health checks
    #[must_use] pub fn run(&self) -> HealthReport {
        let start = Instant::now();
        let mut results = Vec::new();

        for check in &self.checks {
            let check_start = Instant::now();
            let mut result = check.check();
            result.duration_ms = check_start.elapsed().as_millis() as u64;
            results.push(result);
        }

        HealthReport::new(results, start.elapsed())
    }
}

/// Trait for implementing health checks
pub trait HealthCheck: Send + Sync {
    /// Perform the health check and return a result
    fn check(&self) -> CheckResult;
}

/// Check if a command is available
pub struct CommandCheck {
    command: String,
    version_arg: Option<String>,
    required: bool,
}

impl CommandCheck {
    /// Create a required command check
    pub fn new(command: impl Into<String>, version_arg: Option<&str>) -> Self {
        Self {
            command: command.into(),
            version_arg: version_arg.map(String::from),
            required: true,
        }
    }

    /// Create an optional command check (degraded if missing, not unhealthy)
    pub fn optional(command: impl Into<String>, version_arg: Option<&str>) -> Self {
        Self {
            command: command.into(),
            version_arg: version_arg.map(String::from),
            required: false,
        }
    }
}

impl HealthCheck for CommandCheck {
    fn check(&self) -> CheckResult {
        let start = Instant::now();

        if !command_exists(&self.command) {
            let result = if self.required {
                CheckResult::unhealthy(&self.command, format!("{} is not installed", self.command))
            } else {
                CheckResult::degraded(&self.command, format!("{} is not installed (optional)", self.command))
            };
            return result.with_duration(start.elapsed());
        }

        let mut result = CheckResult::healthy(&self.command);
        if let Some(path) = which_command(&self.command) {
            result = result.with_detail("path", path.display().to_string());
        }

        if let Some(ref arg) = self.version_arg {
            if let Ok(output) = run_command(&self.command, &[arg]) {
                if output.success {
                    let version = output.stdout.lines().next().unwrap_or("").trim().to_string();
                    result = result.with_detail("version", version);
                }
            }
        }

        result.with_duration(start.elapsed())
    }
}

/// Check if an environment variable is set
pub struct EnvVarCheck {
    var_name: String,
    required: bool,
}

impl EnvVarCheck {
    /// Create a required environment variable check
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
            required: true,
        }
    }

    /// Create an optional environment variable check
    pub fn optional(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
            required: false,
        }
    }
}

impl HealthCheck for EnvVarCheck {
    fn check(&self) -> CheckResult {
        match std::env::var(&self.var_name) {
            Ok(value) => CheckResult::healthy(&self.var_name)
                .with_detail("value", if value.len() > 50 {
                    format!("{}...", &value[..50])
                } else {
                    value
                }),
            Err(_) => {
                if self.required {
                    CheckResult::unhealthy(&self.var_name, format!("{} is not set", self.var_name))
                } else {
                    CheckResult::degraded(&self.var_name, format!("{} is not set (optional)", self.var_name))
                }
            }
        }
    }
}

/// Check if a path exists and is accessible
pub struct PathCheck {
    path: String,
    check_writable: bool,
}

impl PathCheck {
    /// Create a check for a readable path
    pub fn readable(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            check_writable: false,
        }
    }

    /// Create a check for a writable path
    pub fn writable(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            check_writable: true,
        }
    }
}

impl HealthCheck for PathCheck {
    fn check(&self) -> CheckResult {
        let path = Path::new(&self.path);

        if !path.exists() {
            return CheckResult::unhealthy(&self.path, "Path does not exist");
        }

        if self.check_writable {
            let metadata = match std::fs::metadata(path) {
                Ok(m) => m,
                Err(e) => return CheckResult::unhealthy(&self.path, e.to_string()),
            };

            if metadata.permissions().readonly() {
                return CheckResult::unhealthy(&self.path, "Path is read-only");
            }
        }

        CheckResult::healthy(&self.path)
            .with_detail("exists", "true")
            .with_detail("writable", self.check_writable.to_string())
    }
}
