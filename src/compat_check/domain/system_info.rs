use serde::Serialize;
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Placeholder for runtime values that could not be read
pub const UNKNOWN: &str = "Unknown";

/// PHP ini settings shown in the system info view, in display order
pub const PHP_INI_SETTINGS: [(&str, &str); 6] = [
    ("max_execution_time", "Max Execution Time"),
    ("max_file_uploads", "Max File Uploads"),
    ("max_input_vars", "Max Input Vars"),
    ("post_max_size", "Post Max Size"),
    ("memory_limit", "Memory Limit"),
    ("upload_max_filesize", "Upload Max Filesize"),
];

const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Space on the volume holding the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

impl DiskUsage {
    pub fn new(total_bytes: u64, free_bytes: u64) -> Self {
        Self {
            total_bytes,
            free_bytes,
        }
    }

    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.free_bytes)
    }

    /// Whole gigabytes, rounded down
    pub fn total_gb(&self) -> u64 {
        self.total_bytes / BYTES_PER_GB
    }

    pub fn free_gb(&self) -> u64 {
        self.free_bytes / BYTES_PER_GB
    }

    /// Derived from the rounded totals so the three figures add up
    pub fn used_gb(&self) -> u64 {
        self.total_gb().saturating_sub(self.free_gb())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhpSetting {
    pub name: String,
    pub label: String,
    pub value: String,
}

/// Runtime details of the PHP installation serving the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub php_version: String,
    pub disk: Option<DiskUsage>,
    pub php_settings: Vec<PhpSetting>,
    /// Loaded extensions in natural, case-insensitive order
    pub extensions: Vec<String>,
}

impl SystemInfo {
    /// Every setting starts as [`UNKNOWN`] and no extensions are listed
    pub fn new(php_version: impl Into<String>) -> Self {
        Self {
            php_version: php_version.into(),
            disk: None,
            php_settings: PHP_INI_SETTINGS
                .iter()
                .map(|(name, label)| PhpSetting {
                    name: name.to_string(),
                    label: label.to_string(),
                    value: UNKNOWN.to_string(),
                })
                .collect(),
            extensions: Vec::new(),
        }
    }

    pub fn with_disk(mut self, disk: DiskUsage) -> Self {
        self.disk = Some(disk);
        self
    }

    /// Sets the value of a known setting; other names are ignored
    pub fn with_setting(mut self, name: &str, value: impl Into<String>) -> Self {
        if let Some(setting) = self.php_settings.iter_mut().find(|s| s.name == name) {
            setting.value = value.into();
        }
        self
    }

    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        let mut extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        extensions.sort_by(|a, b| natural_cmp(a, b).then_with(|| a.cmp(b)));
        extensions.dedup();
        self.extensions = extensions;
        self
    }

    pub fn setting(&self, name: &str) -> Option<&str> {
        self.php_settings
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value.as_str())
    }
}

/// Case-insensitive comparison treating digit runs as numbers
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                match take_number(&mut left).cmp(&take_number(&mut right)) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            (Some(x), Some(y)) => match x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase()) {
                Ordering::Equal => {
                    left.next();
                    right.next();
                }
                other => return other,
            },
        }
    }
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> u64 {
    let mut number: u64 = 0;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        number = number.saturating_mul(10).saturating_add(u64::from(digit));
        chars.next();
    }
    number
}
