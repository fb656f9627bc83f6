/// One plugin discovered in the site, as declared by its own header
///
/// Enumerated fresh on every build and never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledComponent {
    /// Path relative to the plugins directory, e.g. `akismet/akismet.php`
    pub file_identifier: String,
    pub name: String,
    pub current_version: String,
    pub homepage_url: String,
    pub text_domain: String,
    pub is_active: bool,
}

impl InstalledComponent {
    pub fn new(file_identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file_identifier: file_identifier.into(),
            name: name.into(),
            current_version: String::new(),
            homepage_url: String::new(),
            text_domain: String::new(),
            is_active: false,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = version.into();
        self
    }

    pub fn with_homepage(mut self, url: impl Into<String>) -> Self {
        self.homepage_url = url.into();
        self
    }

    pub fn with_text_domain(mut self, text_domain: impl Into<String>) -> Self {
        self.text_domain = text_domain.into();
        self
    }

    pub fn activated(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Display name, falling back to the file identifier when the header has none
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.file_identifier
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let component = InstalledComponent::new("hello-dolly/hello.php", "Hello Dolly")
            .with_version("1.7.2")
            .with_homepage("http://wordpress.org/plugins/hello-dolly/")
            .with_text_domain("hello-dolly")
            .activated(true);

        assert_eq!(component.current_version, "1.7.2");
        assert_eq!(component.text_domain, "hello-dolly");
        assert!(component.is_active);
    }

    #[test]
    fn test_display_name_falls_back_to_file() {
        let component = InstalledComponent::new("custom.php", "  ");
        assert_eq!(component.display_name(), "custom.php");
    }
}
