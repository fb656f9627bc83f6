use std::cmp::Ordering;

/// Dotted-version ordering used for core versions and PHP version lists
///
/// Segments compare numerically and missing segments count as zero, so
/// `6.2` equals `6.2.0`. A segment carrying a suffix (`5-RC1`, `0beta`)
/// compares by its leading digits and orders just below the bare number.
pub struct VersionComparator;

impl VersionComparator {
    pub fn compare(a: &str, b: &str) -> Ordering {
        let left = Self::segments(a);
        let right = Self::segments(b);
        let len = left.len().max(right.len());

        for i in 0..len {
            let l = left.get(i).copied().unwrap_or_default();
            let r = right.get(i).copied().unwrap_or_default();
            let ordering = l.cmp(&r);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// `a >= b`
    pub fn is_at_least(a: &str, b: &str) -> bool {
        Self::compare(a, b) != Ordering::Less
    }

    fn segments(version: &str) -> Vec<Segment> {
        version
            .trim()
            .trim_start_matches(['v', 'V'])
            .split('.')
            .map(Segment::parse)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Segment {
    number: u64,
    prerelease: bool,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let digits_end = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        let number = raw[..digits_end].parse().unwrap_or(0);
        Self {
            number,
            prerelease: digits_end < raw.len(),
        }
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            // a bare number outranks the same number with a suffix
            .then_with(|| other.prerelease.cmp(&self.prerelease))
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_versions() {
        assert_eq!(
            VersionComparator::compare("6.2.0", "6.2.0"),
            Ordering::Equal
        );
        assert_eq!(VersionComparator::compare("6.2", "6.2.0"), Ordering::Equal);
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert_eq!(VersionComparator::compare("6.10", "6.9"), Ordering::Greater);
        assert_eq!(VersionComparator::compare("8.0", "10.0"), Ordering::Less);
    }

    #[test]
    fn test_antisymmetry() {
        let pairs = [
            ("6.1.0", "6.5.0"),
            ("5.9", "5.9.3"),
            ("7.4", "8.0"),
            ("6.5-RC1", "6.5"),
            ("1.0.0", "1.0.0"),
        ];
        for (a, b) in pairs {
            assert_eq!(
                VersionComparator::compare(a, b),
                VersionComparator::compare(b, a).reverse(),
                "{} vs {}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_prerelease_sorts_below_release() {
        assert_eq!(
            VersionComparator::compare("6.5-RC1", "6.5"),
            Ordering::Less
        );
        assert_eq!(
            VersionComparator::compare("6.5-RC1", "6.4.3"),
            Ordering::Greater
        );
    }

    #[test]
    fn test_is_at_least() {
        assert!(VersionComparator::is_at_least("6.5.0", "6.5.0"));
        assert!(VersionComparator::is_at_least("6.6", "6.5.2"));
        assert!(!VersionComparator::is_at_least("6.1.0", "6.5.0"));
    }

    #[test]
    fn test_garbage_input_is_total() {
        assert_eq!(VersionComparator::compare("", ""), Ordering::Equal);
        assert_eq!(
            VersionComparator::compare("No Data", "0"),
            Ordering::Less
        );
    }
}
