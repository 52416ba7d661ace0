use semver::Version;

use super::Level;

/// Bump a version according to a level.
///
/// Increments the matching component, resets lower components to 0 and clears
/// pre-release and build metadata:
/// - **Major**: 1.2.3 -> 2.0.0
/// - **Minor**: 1.2.3 -> 1.3.0
/// - **Patch**: 1.2.3 -> 1.2.4
pub fn bump(version: &Version, level: Level) -> Version {
    match level {
        Level::Major => Version::new(version.major + 1, 0, 0),
        Level::Minor => Version::new(version.major, version.minor + 1, 0),
        Level::Patch => Version::new(version.major, version.minor, version.patch + 1),
    }
}
