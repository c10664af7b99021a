//! Install directory naming.
//!
//! Installed mod content lives in a directory named after the mod and
//! modfile it came from. The same encode/parse pair is used by the install
//! path and by enumeration, so a round trip always reproduces the ids.

use crate::catalog::NULL_ID;

/// Directory name for an installed `(mod, modfile)` pair.
///
/// # Examples
///
/// ```
/// use modsync::manager::install_dir_name;
///
/// assert_eq!(install_dir_name(42, 900), "42_900");
/// ```
pub fn install_dir_name(mod_id: u32, modfile_id: u32) -> String {
    format!("{mod_id}_{modfile_id}")
}

/// Decode a directory name back into `(mod_id, modfile_id)`.
///
/// The first underscore-separated segment is the mod id and the last is the
/// modfile id; a segment that does not parse as an id decodes to
/// [`NULL_ID`]. Drop-in directories placed by hand therefore come back as
/// `(NULL_ID, NULL_ID)` and are never claimed by a managed mod.
///
/// # Examples
///
/// ```
/// use modsync::catalog::NULL_ID;
/// use modsync::manager::parse_install_dir_name;
///
/// assert_eq!(parse_install_dir_name("42_900"), (42, 900));
/// assert_eq!(parse_install_dir_name("SomeDropIn"), (NULL_ID, NULL_ID));
/// ```
pub fn parse_install_dir_name(name: &str) -> (u32, u32) {
    let mut segments = name.split('_');
    let mod_id = segments
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(NULL_ID);
    let modfile_id = segments
        .next_back()
        .and_then(|s| s.parse().ok())
        .unwrap_or(NULL_ID);
    (mod_id, modfile_id)
}
