use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::application::read_models::EXPORT_FILE_NAME;
use crate::compat_check::domain::{ActivationStatus, Scope};

/// Check installed WordPress plugins against WordPress.org, WPTide and Portal data
#[derive(Parser, Debug)]
#[command(name = "wp-plugin-compat")]
#[command(version)]
#[command(about = "Check installed WordPress plugins against the latest WordPress release", long_about = None)]
pub struct Args {
    /// Path to the WordPress site root (the directory containing wp-content/)
    #[arg(short, long, global = true, default_value = ".")]
    pub site: PathBuf,

    /// Config file path (defaults to wp-plugin-compat.config.yml in the site root)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Evaluation scope: site or network (overrides default_scope from config)
    #[arg(long, global = true)]
    pub scope: Option<Scope>,

    /// Public site URL used to identify the site to the Portal
    #[arg(long, global = true, value_name = "URL")]
    pub site_url: Option<String>,

    /// Keep state in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the compatibility report, served from the cache when fresh
    Scan {
        /// Output format: html, csv or json
        #[arg(short, long, default_value = "html")]
        format: OutputFormat,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Ignore the cached rows and rebuild them
        #[arg(long)]
        force: bool,

        /// Only list plugins with this status: activated or deactivated
        #[arg(long)]
        status: Option<ActivationStatus>,
    },

    /// Drop the cached rows, request a Portal scan when licensed, and rebuild
    Rescan,

    /// Submit the plugin inventory to the Portal for a PHP compatibility scan
    RequestScan,

    /// Fetch Portal scan results and merge them into the PHP overrides
    FetchRemote,

    /// Validate a license key with the Portal and store it
    ValidateLicense {
        /// License key
        key: String,
    },

    /// Store a license key without validating it (an empty key removes it)
    SaveLicense {
        /// License key
        key: String,
    },

    /// Show the stored license key state
    LicenseStatus,

    /// Fetch Portal results on a fixed interval
    Poll {
        /// Fetch once and exit
        #[arg(long, conflicts_with = "max_runs")]
        once: bool,

        /// Stop after this many fetches
        #[arg(long, value_name = "N")]
        max_runs: Option<u64>,
    },

    /// Export the compatibility table as CSV
    Export {
        /// Output file path
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,

        /// Only export plugins with this status: activated or deactivated
        #[arg(long)]
        status: Option<ActivationStatus>,
    },

    /// Print the environment summary
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print PHP limits, disk space and loaded extensions
    Sysinfo {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    /// Action name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Command::Scan { .. } => "scan",
            Command::Rescan => "rescan",
            Command::RequestScan => "request-scan",
            Command::FetchRemote => "fetch-remote",
            Command::ValidateLicense { .. } => "validate-license",
            Command::SaveLicense { .. } => "save-license",
            Command::LicenseStatus => "license-status",
            Command::Poll { .. } => "poll",
            Command::Export { .. } => "export",
            Command::Stats { .. } => "stats",
            Command::Sysinfo { .. } => "sysinfo",
        }
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("wp-plugin-compat").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_scan_defaults() {
        let args = parse(&["scan"]);
        assert_eq!(args.site, PathBuf::from("."));
        assert!(args.scope.is_none());
        assert!(!args.no_persist);
        match args.command {
            Command::Scan {
                format,
                output,
                force,
                status,
            } => {
                assert_eq!(format, OutputFormat::Html);
                assert!(output.is_none());
                assert!(!force);
                assert!(status.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["scan", "--format", "csv", "--site", "/srv/wp", "--scope", "network", "-v"]);
        assert_eq!(args.site, PathBuf::from("/srv/wp"));
        assert_eq!(args.scope, Some(Scope::Network));
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Scan { format: OutputFormat::Csv, .. }));
    }

    #[test]
    fn test_license_commands_take_key() {
        let args = parse(&["validate-license", "ABC-123"]);
        assert!(matches!(args.command, Command::ValidateLicense { ref key } if key == "ABC-123"));

        let args = parse(&["save-license", ""]);
        assert!(matches!(args.command, Command::SaveLicense { ref key } if key.is_empty()));
    }

    #[test]
    fn test_poll_flags() {
        let args = parse(&["poll", "--max-runs", "3"]);
        assert!(matches!(args.command, Command::Poll { once: false, max_runs: Some(3) }));

        let result = Args::try_parse_from(["wp-plugin-compat", "poll", "--once", "--max-runs", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_default_file_name() {
        let args = parse(&["export"]);
        match args.command {
            Command::Export { output, status } => {
                assert_eq!(output, PathBuf::from("plugin-compatibility-export.csv"));
                assert!(status.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_status_filter_on_scan_and_export() {
        let args = parse(&["scan", "--status", "deactivated"]);
        assert!(matches!(
            args.command,
            Command::Scan { status: Some(ActivationStatus::Deactivated), .. }
        ));

        let args = parse(&["export", "--status", "Activated"]);
        assert!(matches!(
            args.command,
            Command::Export { status: Some(ActivationStatus::Activated), .. }
        ));

        assert!(Args::try_parse_from(["wp-plugin-compat", "scan", "--status", "all"]).is_err());
        assert!(Args::try_parse_from(["wp-plugin-compat", "stats", "--status", "activated"]).is_err());
    }

    #[test]
    fn test_sysinfo_command() {
        let args = parse(&["sysinfo"]);
        assert!(matches!(args.command, Command::Sysinfo { json: false }));
        assert_eq!(args.command.name(), "sysinfo");

        let args = parse(&["sysinfo", "--json"]);
        assert!(matches!(args.command, Command::Sysinfo { json: true }));
    }

    #[test]
    fn test_invalid_format_and_scope_are_rejected() {
        assert!(Args::try_parse_from(["wp-plugin-compat", "scan", "--format", "pdf"]).is_err());
        assert!(Args::try_parse_from(["wp-plugin-compat", "stats", "--scope", "galaxy"]).is_err());
        assert!(Args::try_parse_from(["wp-plugin-compat"]).is_err());
    }
}
