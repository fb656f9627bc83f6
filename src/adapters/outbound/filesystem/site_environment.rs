use crate::compat_check::domain::{DiskUsage, SystemInfo, PHP_INI_SETTINGS, UNKNOWN};
use crate::ports::outbound::SiteEnvironment;
use crate::shared::security::read_regular_file;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sysinfo::Disks;

/// Placeholder for versions that could not be determined
pub const UNKNOWN_VERSION: &str = UNKNOWN;

const PHP_TIMEOUT: Duration = Duration::from_secs(5);

/// JSON printed by the runtime report script
#[derive(Debug, Default, Deserialize)]
struct PhpRuntimeReport {
    #[serde(default)]
    ini: HashMap<String, Value>,
    #[serde(default)]
    extensions: Vec<String>,
}

/// LocalSiteEnvironment adapter describing a WordPress checkout on disk
///
/// Versions are resolved once when the adapter is built. System info is
/// gathered on request from the `php` binary on PATH and the volume
/// holding the site root.
#[derive(Debug, Clone)]
pub struct LocalSiteEnvironment {
    core_version: String,
    php_version: String,
    site_root: Option<PathBuf>,
}

impl LocalSiteEnvironment {
    pub fn new(core_version: impl Into<String>, php_version: impl Into<String>) -> Self {
        Self {
            core_version: core_version.into(),
            php_version: php_version.into(),
            site_root: None,
        }
    }

    /// Reads the core version from `wp-includes/version.php` and resolves
    /// the PHP version from `php_override` or the `php` binary on PATH
    pub async fn detect(site_root: &Path, php_override: Option<&str>) -> Self {
        let core_version = Self::read_core_version(site_root).unwrap_or_else(|| {
            tracing::warn!(site = %site_root.display(), "could not read the WordPress version");
            UNKNOWN_VERSION.to_string()
        });

        let php_version = match php_override.map(str::trim).filter(|v| !v.is_empty()) {
            Some(version) => version.to_string(),
            None => Self::run_php("echo PHP_VERSION;", None)
                .await
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        };

        Self {
            core_version,
            php_version,
            site_root: Some(site_root.to_path_buf()),
        }
    }

    fn read_core_version(site_root: &Path) -> Option<String> {
        let path = site_root.join("wp-includes").join("version.php");
        let source = read_regular_file(&path, "version.php").ok()?;
        Self::parse_wp_version(&source)
    }

    /// Extracts the value of `$wp_version = '...';`
    fn parse_wp_version(source: &str) -> Option<String> {
        source.lines().find_map(|line| {
            let rest = line.trim().strip_prefix("$wp_version")?;
            let rest = rest.trim_start().strip_prefix('=')?.trim_start();
            let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
            let value = rest[1..].split(quote).next()?;
            (!value.is_empty()).then(|| value.to_string())
        })
    }

    /// Runs `php -r <script>` and returns its trimmed stdout
    async fn run_php(script: &str, current_dir: Option<&Path>) -> Option<String> {
        let mut command = tokio::process::Command::new("php");
        command.args(["-r", script]).kill_on_drop(true);
        if let Some(dir) = current_dir {
            command.current_dir(dir);
        }

        match tokio::time::timeout(PHP_TIMEOUT, command.output()).await {
            Ok(Ok(output)) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
                (!stdout.is_empty()).then_some(stdout)
            }
            Ok(Ok(output)) => {
                tracing::debug!(status = %output.status, "php invocation failed");
                None
            }
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "php binary not available");
                None
            }
            Err(_) => {
                tracing::debug!("php invocation timed out");
                None
            }
        }
    }

    /// PHP snippet printing the tracked ini values and loaded extensions as JSON
    fn runtime_report_script() -> String {
        let names = PHP_INI_SETTINGS
            .iter()
            .map(|(name, _)| format!("'{}'", name))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "$k=[{}];echo json_encode(['ini'=>array_combine($k,array_map('ini_get',$k)),'extensions'=>get_loaded_extensions()]);",
            names
        )
    }

    fn parse_runtime_report(output: &str) -> Option<PhpRuntimeReport> {
        match serde_json::from_str(output) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::debug!(error = %e, "unreadable php runtime report");
                None
            }
        }
    }

    fn apply_runtime_report(info: SystemInfo, report: PhpRuntimeReport) -> SystemInfo {
        let info = report
            .ini
            .iter()
            .fold(info, |info, (name, value)| match value {
                Value::String(text) => info.with_setting(name, text.as_str()),
                Value::Number(number) => info.with_setting(name, number.to_string()),
                _ => info,
            });
        info.with_extensions(report.extensions)
    }

    /// Space on the mounted volume that holds `path`
    fn disk_usage(path: &Path) -> Option<DiskUsage> {
        let path = path.canonicalize().ok()?;
        let disks = Disks::new_with_refreshed_list();
        disks
            .list()
            .iter()
            .filter(|disk| path.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())
            .map(|disk| DiskUsage::new(disk.total_space(), disk.available_space()))
    }
}

#[async_trait]
impl SiteEnvironment for LocalSiteEnvironment {
    fn local_core_version(&self) -> String {
        self.core_version.clone()
    }

    fn php_version(&self) -> String {
        self.php_version.clone()
    }

    async fn system_info(&self) -> SystemInfo {
        let info = SystemInfo::new(self.php_version.clone());
        let Some(site_root) = self.site_root.as_deref() else {
            return info;
        };

        let info = match Self::disk_usage(site_root) {
            Some(disk) => info.with_disk(disk),
            None => {
                tracing::debug!(site = %site_root.display(), "no mounted volume found for site");
                info
            }
        };

        match Self::run_php(&Self::runtime_report_script(), Some(site_root))
            .await
            .and_then(|output| Self::parse_runtime_report(&output))
        {
            Some(report) => Self::apply_runtime_report(info, report),
            None => info,
        }
    }
}
