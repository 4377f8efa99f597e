//! Common constants used throughout the ahoy application.

/// Skeleton descriptor locations, relative to the template root, in lookup order.
pub const CONFIG_FILES: [&str; 2] = [".ahoy/skeleton.json", ".ahoy/skeleton.yml"];

/// User settings file looked up in the home directory.
pub const SETTINGS_FILE: &str = ".ahoyrc";

/// Variable holding the project name; the target root is named after it.
pub const PROJECT_NAME_VAR: &str = "skeleton_name";

/// Path template of the target root, relative to the output directory.
pub const TARGET_ROOT_TEMPLATE: &str = "{{ skeleton_name }}";

/// Checkout used when a repository reference does not name one.
pub const DEFAULT_CHECKOUT: &str = "master";

/// Ignore patterns applied to every skeleton unless the settings override them.
pub const DEFAULT_IGNORE: [&str; 3] = [".ahoy/**", ".git/**", "**/.DS_Store"];

/// Names of the built-in questions. Skeleton fields may not reuse them.
pub const RESERVED_FIELD_NAMES: [&str; 7] = [
    "skeleton_name",
    "skeleton_description",
    "skeleton_author",
    "skeleton_keywords",
    "skeleton_version",
    "skeleton_license",
    "skeleton_repository",
];

/// Licenses offered by the built-in license question as `(title, value)` pairs.
pub const LICENSES: &[(&str, &str)] = &[
    ("No License", "no-license"),
    ("Academic Free License v3.0", "afl-3.0"),
    ("Apache license 2.0", "apache-2.0"),
    ("Artistic license 2.0", "artistic-2.0"),
    ("Boost Software License 1.0", "bsl-1.0"),
    ("BSD 2-clause Simplified license", "bsd-2-clause"),
    ("BSD 3-clause New or Revised license", "bsd-3-clause"),
    ("BSD 3-clause Clear license", "bsd-3-clause-clear"),
    ("Creative Commons license family", "cc"),
    ("Creative Commons Zero v1.0 Universal", "cc0-1.0"),
    ("Creative Commons Attribution 4.0", "cc-by-4.0"),
    ("Creative Commons Attribution Share Alike 4.0", "cc-by-sa-4.0"),
    ("Do What The F*ck You Want To Public License", "wtfpl"),
    ("Educational Community License v2.0", "ecl-2.0"),
    ("Eclipse Public License 1.0", "epl-1.0"),
    ("Eclipse Public License 2.0", "epl-2.0"),
    ("European Union Public License 1.1", "eupl-1.1"),
    ("GNU Affero General Public License v3.0", "agpl-3.0"),
    ("GNU General Public License family", "gpl"),
    ("GNU General Public License v2.0", "gpl-2.0"),
    ("GNU General Public License v3.0", "gpl-3.0"),
    ("GNU Lesser General Public License family", "lgpl"),
    ("GNU Lesser General Public License v2.1", "lgpl-2.1"),
    ("GNU Lesser General Public License v3.0", "lgpl-3.0"),
    ("ISC", "isc"),
    ("LaTeX Project Public License v1.3c", "lppl-1.3c"),
    ("Microsoft Public License", "ms-pl"),
    ("MIT", "mit"),
    ("Mozilla Public License 2.0", "mpl-2.0"),
    ("Open Software License 3.0", "osl-3.0"),
    ("PostgreSQL License", "postgresql"),
    ("SIL Open Font License 1.1", "ofl-1.1"),
    ("University of Illinois/NCSA Open Source License", "ncsa"),
    ("The Unlicense", "unlicense"),
    ("zLib License", "zlib"),
];

/// Input hints shown next to date-like questions.
pub fn date_mask(field_type: &str) -> Option<&'static str> {
    match field_type {
        "week" => Some("dddd"),
        "time" => Some("hh:mm:ss a"),
        "month" => Some("MMMM"),
        "date" => Some("YYYY-MM-DD"),
        "datetime-local" => Some("YYYY-MM-DD hh:mm:ss a"),
        _ => None,
    }
}
