/// Top-level package.json fields that are copied to the output by default.
///
/// Everything npm documents as publishable metadata, except `scripts`,
/// `devDependencies`, `main` and `types`. The last three entries are the
/// path-bearing fields rewritten by `--strip`.
/// https://docs.npmjs.com/cli/v8/configuring-npm/package-json
pub const STANDARD_SECTIONS: [&str; 31] = [
    "name",
    "version",
    "description",
    "keywords",
    "homepage",
    "bugs",
    "license",
    "author",
    "contributors",
    "funding",
    "files",
    "browser",
    "bin",
    "man",
    "directories",
    "repository",
    "config",
    "dependencies",
    "peerDependencies",
    "peerDependenciesMeta",
    "bundleDependencies",
    "optionalDependencies",
    "overrides",
    "engines",
    "os",
    "cpu",
    "private",
    "publishConfig",
    "module",
    "typesVersions",
    "exports",
];

/// Ordered set of field names allowed into the output manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionAllowList {
    sections: Vec<String>,
}

impl SectionAllowList {
    pub fn new() -> Self {
        Self {
            sections: STANDARD_SECTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Standard sections followed by `custom` in the given order.
    /// Names already on the list keep their first position.
    pub fn with_custom_sections<I, S>(custom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for section in custom {
            let section = section.into();
            if !list.contains(&section) {
                list.sections.push(section);
            }
        }
        list
    }

    pub fn contains(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s == section)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Default for SectionAllowList {
    fn default() -> Self {
        Self::new()
    }
}
