/// Network adapters for the WordPress.org, WPTide and Portal APIs
mod caching_metadata_repository;
mod http_client;
mod portal_client;
mod wporg_client;
mod wptide_client;

pub use caching_metadata_repository::CachingMetadataRepository;
pub use portal_client::{PortalHttpClient, DEFAULT_PORTAL_API_URL};
pub use wporg_client::{WpOrgClient, DEFAULT_WPORG_API_URL};
pub use wptide_client::{WpTideClient, DEFAULT_WPTIDE_API_URL};
