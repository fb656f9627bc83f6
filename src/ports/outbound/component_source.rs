use crate::compat_check::domain::{InstalledComponent, Scope};
use crate::shared::Result;

/// ComponentSource port for enumerating installed plugins
///
/// This port abstracts plugin discovery (e.g. scanning `wp-content/plugins`)
/// and the activation bookkeeping for each scope.
pub trait ComponentSource: Send + Sync {
    /// Lists every installed plugin with `is_active` set for the given scope
    ///
    /// Order follows the host's enumeration and is not guaranteed stable.
    ///
    /// # Errors
    /// Returns an error if the plugins directory cannot be read
    fn enumerate(&self, scope: Scope) -> Result<Vec<InstalledComponent>>;
}

impl<T: ComponentSource + ?Sized> ComponentSource for std::sync::Arc<T> {
    fn enumerate(&self, scope: Scope) -> Result<Vec<InstalledComponent>> {
        (**self).enumerate(scope)
    }
}
