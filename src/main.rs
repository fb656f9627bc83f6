mod adapters;
mod application;
mod cli;
mod compat_check;
mod config;
mod ports;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{LocalSiteEnvironment, PluginDirectoryReader};
use adapters::outbound::network::{
    CachingMetadataRepository, PortalHttpClient, WpOrgClient, WpTideClient,
};
use adapters::outbound::storage::{FileStore, MemoryStore};
use application::dto::{ActionOutcome, OutputFormat, ScanRequest};
use application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use application::read_models::EnvironmentStats;
use application::use_cases::{
    AggregateCompatibilityUseCase, CompatActionsUseCase, DashboardUseCase, LicenseUseCase,
    PortalSyncUseCase, ScanCacheUseCase,
};
use cli::{Args, Command};
use compat_check::domain::{Scope, SystemInfo};
use compat_check::services::OverrideMerger;
use config::{discover_config, load_config_from_path, ConfigFile, Settings, CONFIG_FILENAME};
use owo_colors::OwoColorize;
use ports::outbound::{KeyValueStore, OutputPresenter, ReportFormatter};
use shared::error::{CompatError, ExitCode};
use shared::Result;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type Store = Arc<dyn KeyValueStore>;
type Plugins = Arc<PluginDirectoryReader>;
type Site = Arc<LocalSiteEnvironment>;
type CoreSource = Arc<WpOrgClient>;
type Portal = Arc<PortalHttpClient>;
type Aggregator = AggregateCompatibilityUseCase<
    Plugins,
    Site,
    CoreSource,
    CachingMetadataRepository<WpOrgClient>,
    WpTideClient,
    StderrProgressReporter,
>;
type Actions = CompatActionsUseCase<Store, Aggregator, Plugins, Site, CoreSource, Portal>;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n{} An error occurred:\n", "❌".red());
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

/// Logs go to stderr; `RUST_LOG` wins unless `--verbose` is given
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("wp_plugin_compat=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    validate_site_path(&args.site)?;

    let config = match args.config.as_deref() {
        Some(path) => load_config_from_path(path)?,
        None => match discover_config(&args.site)? {
            Some(config) => {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    args.site.join(CONFIG_FILENAME).display()
                );
                config
            }
            None => ConfigFile::default(),
        },
    };
    let mut settings = Settings::from_config(config, &args.site);
    if let Some(site_url) = args.site_url.as_deref() {
        settings.site_url = Some(site_url.trim().to_string());
    }
    if let Some(scope) = args.scope {
        settings.default_scope = scope;
    }
    let scope = settings.default_scope;

    tracing::debug!(command = args.command.name(), %scope, site = %args.site.display(), "starting");
    let actions = build_actions(&args, &settings).await?;

    match args.command {
        Command::Scan {
            format,
            output,
            force,
            status,
        } => {
            eprintln!("{}", FormatterFactory::progress_message(format));
            let report = actions
                .report(ScanRequest::new(scope, force).with_status(status))
                .await?;
            let content = FormatterFactory::create(format).format(&report)?;
            PresenterFactory::create(PresenterType::from_output(output)).present(&content)?;
        }
        Command::Export { output, status } => {
            eprintln!("{}", FormatterFactory::progress_message(OutputFormat::Csv));
            let report = actions
                .report(ScanRequest::new(scope, false).with_status(status))
                .await?;
            let content = FormatterFactory::create(OutputFormat::Csv).format(&report)?;
            PresenterFactory::create(PresenterType::File(output)).present(&content)?;
        }
        Command::Rescan => print_outcome(&actions.rescan(scope).await?),
        Command::RequestScan => print_outcome(&actions.request_scan().await?),
        Command::FetchRemote => print_outcome(&actions.fetch_remote_results().await?),
        Command::ValidateLicense { key } => {
            let site = settings.site_url.clone().ok_or_else(|| CompatError::Validation {
                message: "No site URL configured. Pass --site-url or set site_url in the config file"
                    .to_string(),
            })?;
            print_outcome(&actions.validate_license(&key, &site).await?);
        }
        Command::SaveLicense { key } => print_outcome(&actions.save_license(&key)?),
        Command::LicenseStatus => {
            let license = actions.license_state()?;
            if !license.is_set() {
                println!("License: not set");
            } else if license.valid {
                println!("License: {} ({})", mask_key(&license.key), "valid".green());
            } else {
                println!("License: {} ({})", mask_key(&license.key), "not validated".yellow());
            }
        }
        Command::Poll { once, max_runs } => {
            let max_runs = if once { Some(1) } else { max_runs };
            eprintln!(
                "⏳ Polling Portal results every {} minute(s)...",
                settings.poll_interval.as_secs() / 60
            );
            let runs = actions.poll(settings.poll_interval, max_runs).await?;
            eprintln!("✅ Polling finished after {} fetch(es)", runs);
        }
        Command::Stats { json } => {
            let stats = actions.stats(scope).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(scope, &stats);
            }
        }
        Command::Sysinfo { json } => {
            let info = actions.system_info().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                print_system_info(&info);
            }
        }
    }

    Ok(())
}

/// Wires the concrete adapters into the action use case
async fn build_actions(args: &Args, settings: &Settings) -> Result<Actions> {
    let store: Store = if args.no_persist {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::open(&settings.state_dir)?)
    };

    let plugins: Plugins = Arc::new(PluginDirectoryReader::new(&args.site).with_activation(
        settings.active_plugins.clone(),
        settings.network_active_plugins.clone(),
    ));
    let site: Site =
        Arc::new(LocalSiteEnvironment::detect(&args.site, settings.php_version.as_deref()).await);
    let core_source: CoreSource = Arc::new(WpOrgClient::with_base_url(&settings.wporg_api_url)?);
    let metadata =
        CachingMetadataRepository::new(WpOrgClient::with_base_url(&settings.wporg_api_url)?);
    let audits = WpTideClient::with_base_url(&settings.wptide_api_url)?;
    let portal: Portal = Arc::new(PortalHttpClient::with_base_url(&settings.portal_api_url)?);

    let aggregator = AggregateCompatibilityUseCase::new(
        plugins.clone(),
        site.clone(),
        core_source.clone(),
        metadata,
        audits,
        StderrProgressReporter::new(),
    )
    .with_concurrency(settings.concurrency);

    let scan_cache = ScanCacheUseCase::new(store.clone(), aggregator).with_ttl(settings.cache_ttl);
    let license = LicenseUseCase::new(store.clone(), portal.clone());
    let portal_sync = PortalSyncUseCase::new(
        store,
        plugins.clone(),
        portal,
        settings.site_url.clone().unwrap_or_default(),
    )
    .with_merger(OverrideMerger::new(settings.portal_standard.clone()))
    .with_inventory_scope(settings.default_scope);
    let dashboard = DashboardUseCase::new(plugins, site, core_source);

    Ok(CompatActionsUseCase::new(
        settings.operator.clone(),
        settings.default_scope,
        scan_cache,
        license,
        portal_sync,
        dashboard,
    ))
}

fn print_outcome(outcome: &ActionOutcome) {
    println!("{} {}", "✔".green(), outcome.message);
    if outcome.updated_count > 0 {
        println!("  Updated PHP overrides: {}", outcome.updated_count);
    }
    if outcome.scan_pending {
        println!("  {}", "Portal scan pending".yellow());
    }
}

fn print_stats(scope: Scope, stats: &EnvironmentStats) {
    let suffix = match scope {
        Scope::Site => "",
        Scope::Network => " (Network)",
    };
    println!("WordPress: {}", stats.wp_version);
    println!("PHP: {}", stats.php_version);
    println!("Plugins Installed: {}", stats.plugins_total);
    println!("Plugins Active{}: {}", suffix, stats.plugins_active);
    println!("Plugins Inactive{}: {}", suffix, stats.plugins_inactive);
    if stats.is_on_latest_core() {
        println!("{}", stats.core_notice().green());
    } else {
        println!("{}", stats.core_notice().yellow());
    }
}

fn print_system_info(info: &SystemInfo) {
    println!("System Info");
    println!("Your Current PHP Version is: {}", info.php_version);
    match info.disk {
        Some(disk) => {
            println!("Disk Total Space: {} GB", disk.total_gb());
            println!("Disk Space Used: {} GB", disk.used_gb());
            println!("Disk Space Free: {} GB", disk.free_gb());
        }
        None => println!("Disk Space: {}", "unavailable".yellow()),
    }
    for setting in &info.php_settings {
        println!("{}: {}", setting.label, setting.value);
    }
    println!("List of Loaded Extensions ({}):", info.extensions.len());
    for extension in &info.extensions {
        println!("  {}", extension);
    }
}

/// Shows only the last four characters of a license key
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let visible = chars.len().min(4);
    let hidden = chars.len() - visible;
    let tail: String = chars[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), tail)
}

fn validate_site_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CompatError::InvalidSitePath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for site paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| CompatError::InvalidSitePath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(CompatError::InvalidSitePath {
            path: path.to_path_buf(),
            reason: "Security: Site path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(CompatError::InvalidSitePath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
