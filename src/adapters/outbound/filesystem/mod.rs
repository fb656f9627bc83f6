/// Filesystem adapters for the WordPress checkout and report output
mod file_writer;
mod plugin_directory_reader;
mod site_environment;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use plugin_directory_reader::PluginDirectoryReader;
pub use site_environment::{LocalSiteEnvironment, UNKNOWN_VERSION};
