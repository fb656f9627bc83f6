/// Derives the plugin-directory slug for an installed plugin
///
/// Resolution order:
/// 1. the directory part of the file identifier, when the plugin lives in
///    its own folder
/// 2. the sanitized text domain
/// 3. the fifth `/`-separated part of the homepage URL
///    (`https://host/plugins/<slug>/`)
///
/// An empty result means the plugin cannot be looked up anywhere.
pub struct SlugResolver;

impl SlugResolver {
    pub fn resolve(file_identifier: &str, text_domain: &str, homepage_url: &str) -> String {
        if let Some(dir) = Self::directory_of(file_identifier) {
            return dir.to_string();
        }

        if !text_domain.trim().is_empty() {
            let sanitized = Self::sanitize_title(text_domain);
            if !sanitized.is_empty() {
                return sanitized;
            }
        }

        if !homepage_url.is_empty() {
            if let Some(part) = homepage_url.splitn(5, '/').nth(4) {
                let trimmed = part.trim_end_matches('/');
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }

        String::new()
    }

    /// Directory portion of `dir/file.php`, or `None` for a flat root file
    fn directory_of(file_identifier: &str) -> Option<&str> {
        let normalized = file_identifier.trim_start_matches("./");
        let (dir, _file) = normalized.rsplit_once('/')?;
        match dir {
            "" | "." => None,
            dir => Some(dir),
        }
    }

    /// URL-safe slug: lowercase ASCII alphanumerics separated by single hyphens
    pub fn sanitize_title(input: &str) -> String {
        let mut slug = String::with_capacity(input.len());
        let mut pending_separator = false;

        for c in input.trim().chars() {
            if c.is_ascii_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(c.to_ascii_lowercase());
            } else if c.is_whitespace() || matches!(c, '-' | '_' | '.' | '/') {
                pending_separator = true;
            }
        }

        slug
    }
}
