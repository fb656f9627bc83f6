use crate::compat_check::domain::{InstalledComponent, Scope};
use crate::ports::outbound::ComponentSource;
use crate::shared::error::CompatError;
use crate::shared::security::HEADER_SCAN_BYTES;
use crate::shared::Result;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Plugin headers read from the top of a plugin's main file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct PluginHeaders {
    name: String,
    plugin_uri: String,
    version: String,
    text_domain: String,
}

impl PluginHeaders {
    /// Parses WordPress-style `Key: value` headers
    ///
    /// Header lines may start with `<?php` and comment decoration
    /// (` \t/*#@`); keys match case-insensitively. A trailing `*/` is dropped.
    fn parse(source: &str) -> Self {
        let mut headers = Self::default();
        for line in source.split(['\n', '\r']) {
            let line = line.trim_start_matches([' ', '\t']);
            let line = line.strip_prefix("<?php").unwrap_or(line);
            let line = line.trim_start_matches([' ', '\t', '/', '*', '#', '@']);
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let slot = match key.trim().to_ascii_lowercase().as_str() {
                "plugin name" => &mut headers.name,
                "plugin uri" => &mut headers.plugin_uri,
                "version" => &mut headers.version,
                "text domain" => &mut headers.text_domain,
                _ => continue,
            };
            if slot.is_empty() {
                *slot = Self::clean_value(value);
            }
        }
        headers
    }

    fn clean_value(value: &str) -> String {
        let value = value.trim();
        value
            .strip_suffix("*/")
            .unwrap_or(value)
            .trim()
            .to_string()
    }
}

/// PluginDirectoryReader adapter enumerating `wp-content/plugins`
///
/// Mirrors how WordPress discovers plugins: PHP files directly in the
/// plugins directory, plus PHP files one level down in each plugin
/// directory, keeping those that declare a `Plugin Name` header. Results
/// are ordered by plugin name. Activation comes from the configured
/// active lists of each scope.
pub struct PluginDirectoryReader {
    plugins_dir: PathBuf,
    active_plugins: HashSet<String>,
    network_active_plugins: HashSet<String>,
}

impl PluginDirectoryReader {
    pub fn new(site_root: &Path) -> Self {
        Self {
            plugins_dir: site_root.join("wp-content").join("plugins"),
            active_plugins: HashSet::new(),
            network_active_plugins: HashSet::new(),
        }
    }

    /// Sets the plugin files active on the site and across the network
    pub fn with_activation(
        mut self,
        active_plugins: impl IntoIterator<Item = String>,
        network_active_plugins: impl IntoIterator<Item = String>,
    ) -> Self {
        self.active_plugins = active_plugins.into_iter().collect();
        self.network_active_plugins = network_active_plugins.into_iter().collect();
        self
    }

    fn read_error(&self, reason: impl Into<String>) -> anyhow::Error {
        CompatError::InvalidSitePath {
            path: self.plugins_dir.clone(),
            reason: reason.into(),
        }
        .into()
    }

    /// Reads at most the header window of a file
    fn read_header_window(path: &Path) -> Option<String> {
        let file = File::open(path).ok()?;
        let mut buffer = Vec::with_capacity(HEADER_SCAN_BYTES);
        file.take(HEADER_SCAN_BYTES as u64)
            .read_to_end(&mut buffer)
            .ok()?;
        Some(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn is_php_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("php"))
    }

    fn is_hidden(name: &str) -> bool {
        name.starts_with('.')
    }

    /// Lists `(file_identifier, path)` pairs of candidate plugin files
    fn candidate_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.plugins_dir)
            .map_err(|e| self.read_error(format!("Failed to read plugins directory: {}", e)))?;

        let mut candidates = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if Self::is_hidden(&name) {
                continue;
            }
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_symlink() {
                tracing::warn!(entry = %name, "skipping symbolic link in plugins directory");
                continue;
            }

            let path = entry.path();
            if file_type.is_file() && Self::is_php_file(&path) {
                candidates.push((name, path));
            } else if file_type.is_dir() {
                let Ok(inner) = fs::read_dir(&path) else {
                    tracing::warn!(dir = %path.display(), "unreadable plugin directory");
                    continue;
                };
                for inner_entry in inner.flatten() {
                    let inner_name = inner_entry.file_name().to_string_lossy().into_owned();
                    let inner_path = inner_entry.path();
                    let is_plain_file = inner_entry
                        .file_type()
                        .is_ok_and(|t| t.is_file() && !t.is_symlink());
                    if is_plain_file && !Self::is_hidden(&inner_name) && Self::is_php_file(&inner_path) {
                        candidates.push((format!("{}/{}", name, inner_name), inner_path));
                    }
                }
            }
        }
        Ok(candidates)
    }
}

impl ComponentSource for PluginDirectoryReader {
    fn enumerate(&self, scope: Scope) -> Result<Vec<InstalledComponent>> {
        if !self.plugins_dir.is_dir() {
            tracing::debug!(dir = %self.plugins_dir.display(), "no plugins directory");
            return Ok(Vec::new());
        }

        let active = match scope {
            Scope::Site => &self.active_plugins,
            Scope::Network => &self.network_active_plugins,
        };

        let mut components: Vec<InstalledComponent> = self
            .candidate_files()?
            .into_iter()
            .filter_map(|(file_identifier, path)| {
                let headers = PluginHeaders::parse(&Self::read_header_window(&path)?);
                if headers.name.is_empty() {
                    return None;
                }
                let is_active = active.contains(&file_identifier);
                Some(
                    InstalledComponent::new(file_identifier, headers.name)
                        .with_version(headers.version)
                        .with_homepage(headers.plugin_uri)
                        .with_text_domain(headers.text_domain)
                        .activated(is_active),
                )
            })
            .collect();

        components.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.file_identifier.cmp(&b.file_identifier))
        });

        tracing::debug!(scope = %scope, count = components.len(), "enumerated plugins");
        Ok(components)
    }
}
