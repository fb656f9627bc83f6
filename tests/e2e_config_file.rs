/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from a config file on disk through CLI
/// invocation to the resulting output, using `assert_cmd` and `tempfile`
/// for isolated WordPress checkouts.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Remote APIs pointed at a closed port so no test touches the network
const OFFLINE_APIS: &str = r#"
php_version: "8.1.27"
wporg_api_url: http://127.0.0.1:1
wptide_api_url: http://127.0.0.1:1
portal_api_url: http://127.0.0.1:1
"#;

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Create a WordPress checkout with two plugins and no config file.
fn create_test_site(dir: &Path) {
    write_file(
        &dir.join("wp-includes/version.php"),
        "<?php\n$wp_version = '6.5.2';\n",
    );
    write_file(
        &dir.join("wp-content/plugins/akismet/akismet.php"),
        "<?php\n/*\nPlugin Name: Akismet\nVersion: 5.3\n*/\n",
    );
    write_file(
        &dir.join("wp-content/plugins/jetpack/jetpack.php"),
        "<?php\n/*\nPlugin Name: Jetpack\nVersion: 13.0\n*/\n",
    );
}

/// Write the auto-discovered config file with extra lines after the offline APIs.
fn write_site_config(dir: &Path, extra: &str) {
    write_file(
        &dir.join("wp-plugin-compat.config.yml"),
        &format!("{}{}", OFFLINE_APIS, extra),
    );
}

fn site_arg(dir: &TempDir) -> &str {
    dir.path().to_str().unwrap()
}

// ============================================================================
// Config File Auto-Discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_activation_lists() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        write_site_config(
            dir.path(),
            "active_plugins:\n  - jetpack/jetpack.php\nnetwork_active_plugins:\n  - akismet/akismet.php\n",
        );

        let output = cargo_bin_cmd!("wp-plugin-compat")
            .args(["scan", "-f", "json", "--site", site_arg(&dir)])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["rows"][0]["status"], "Deactivated");
        assert_eq!(json["rows"][1]["status"], "Activated");

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Auto-discovered config file"));
    }

    #[test]
    fn test_auto_discovery_applies_default_scope() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        write_site_config(
            dir.path(),
            "default_scope: network\nnetwork_active_plugins:\n  - akismet/akismet.php\n",
        );

        let output = cargo_bin_cmd!("wp-plugin-compat")
            .args(["scan", "-f", "csv", "--no-persist", "--site", site_arg(&dir)])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Plugin Network Status"));
        assert!(stdout.contains("Akismet,5.3,No Data,No Data,No Data,Activated"));
    }

    #[test]
    fn test_auto_discovery_applies_php_version() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        write_site_config(dir.path(), "");

        cargo_bin_cmd!("wp-plugin-compat")
            .args(["stats", "--site", site_arg(&dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("PHP: 8.1.27"));
    }

    #[test]
    fn test_unknown_fields_are_warned() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        write_site_config(dir.path(), "check_cve: true\n");

        cargo_bin_cmd!("wp-plugin-compat")
            .args(["stats", "--site", site_arg(&dir)])
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Unknown config field 'check_cve' will be ignored",
            ));
    }
}

// ============================================================================
// Explicit --config Tests
// ============================================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_overrides_discovery() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        write_site_config(dir.path(), "php_version_typo: 1\n");

        let config_dir = TempDir::new().unwrap();
        let config_path = config_dir.path().join("custom.yml");
        write_file(
            &config_path,
            &format!("{}active_plugins:\n  - akismet/akismet.php\n", OFFLINE_APIS),
        );

        let output = cargo_bin_cmd!("wp-plugin-compat")
            .args([
                "stats",
                "--json",
                "--site",
                site_arg(&dir),
                "--config",
                config_path.to_str().unwrap(),
            ])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("php_version_typo"));
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["plugins_active"], 1);
    }

    #[test]
    fn test_missing_explicit_config_is_application_error() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());

        cargo_bin_cmd!("wp-plugin-compat")
            .args(["stats", "--site", site_arg(&dir), "--config", "/nonexistent/config.yml"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_config_value_is_application_error() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        write_site_config(dir.path(), "cache_ttl_hours: 0\n");

        cargo_bin_cmd!("wp-plugin-compat")
            .args(["stats", "--site", site_arg(&dir)])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("cache_ttl_hours must be greater than zero"));
    }

    #[test]
    fn test_broken_yaml_is_application_error() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        write_file(
            &dir.path().join("wp-plugin-compat.config.yml"),
            "invalid: yaml: [[[broken",
        );

        cargo_bin_cmd!("wp-plugin-compat")
            .args(["stats", "--site", site_arg(&dir)])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }
}

// ============================================================================
// CLI / Config Merge Tests
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_cli_scope_overrides_default_scope() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        write_site_config(dir.path(), "default_scope: network\n");

        let output = cargo_bin_cmd!("wp-plugin-compat")
            .args(["scan", "-f", "json", "--no-persist", "--scope", "site", "--site", site_arg(&dir)])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["scope"], "site");
    }

    #[test]
    fn test_configured_state_dir_receives_cache() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        let state_dir = TempDir::new().unwrap();
        write_site_config(
            dir.path(),
            &format!("state_dir: {}\n", state_dir.path().display()),
        );

        cargo_bin_cmd!("wp-plugin-compat")
            .args(["scan", "--site", site_arg(&dir)])
            .assert()
            .success();

        assert!(state_dir.path().join("pcc_scan_results.site.json").is_file());
        assert!(!dir.path().join(".wp-plugin-compat").exists());
    }

    #[test]
    fn test_capabilities_restrict_network_actions() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        write_site_config(dir.path(), "capabilities:\n  - manage_options\n");

        cargo_bin_cmd!("wp-plugin-compat")
            .args(["rescan", "--scope", "network", "--site", site_arg(&dir)])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("requires the manage_network capability"));

        cargo_bin_cmd!("wp-plugin-compat")
            .args(["rescan", "--scope", "site", "--site", site_arg(&dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Rescan complete: 2 plugin(s) checked."));
    }

    #[test]
    fn test_site_url_from_config_is_used_for_validation() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());

        // Without a site URL the command fails before contacting the Portal
        write_site_config(dir.path(), "");
        cargo_bin_cmd!("wp-plugin-compat")
            .args(["validate-license", "KEY-1", "--site", site_arg(&dir)])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("No site URL configured"));

        write_site_config(dir.path(), "site_url: https://www.example.com\n");
        cargo_bin_cmd!("wp-plugin-compat")
            .args(["validate-license", "KEY-1", "--site", site_arg(&dir)])
            .assert()
            .code(4);
    }
}

mod bounds_tests {
    use super::*;

    #[test]
    fn test_oversized_cache_ttl_is_rejected_before_scanning() {
        let dir = TempDir::new().unwrap();
        create_test_site(dir.path());
        write_site_config(dir.path(), "cache_ttl_hours: 100000000000\n");

        cargo_bin_cmd!("wp-plugin-compat")
            .args(["scan", "--site", site_arg(&dir)])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("cache_ttl_hours must be at most"));

        assert!(!dir.path().join(".wp-plugin-compat").exists());
    }
}
