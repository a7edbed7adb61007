use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::manifest::{read_manifest, write_manifest, Manifest};
use crate::sections::SectionAllowList;
use crate::strip::PrefixStrip;

/// String fields whose value is rewritten directly by `--strip`.
const STRIPPED_STRING_FIELDS: [&str; 3] = ["main", "types", "module"];

/// Fields whose nested string values are all rewritten by `--strip`.
const STRIPPED_TREE_FIELDS: [&str; 2] = ["typesVersions", "exports"];

#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub main: String,
    pub types: String,
    pub strip: Option<String>,
}

pub struct ManifestTransformer {
    sections: SectionAllowList,
}

impl ManifestTransformer {
    pub fn new(sections: SectionAllowList) -> Self {
        Self { sections }
    }

    /// Reads `<input_folder>/package.json`, rewrites it and writes the
    /// result to `<output_folder>/package.json`.
    pub fn transform(&self, request: &TransformRequest) -> Result<PathBuf> {
        debug!("Reading manifest from {}", request.input_folder.display());
        let manifest = read_manifest(&request.input_folder)?;

        let strip = request.strip.as_deref().and_then(PrefixStrip::new);
        let output = self.apply(manifest, &request.main, &request.types, strip.as_ref());

        let written = write_manifest(&request.output_folder, &output)?;
        info!("Wrote {} fields to {}", output.len(), written.display());

        println!("✅ package.json written to: {}", request.output_folder.display());

        Ok(written)
    }

    /// Builds the output manifest: `main` and `types` first, then every
    /// allow-listed field present in `manifest`, in allow-list order.
    pub fn apply(
        &self,
        mut manifest: Manifest,
        main: &str,
        types: &str,
        strip: Option<&PrefixStrip>,
    ) -> Manifest {
        if let Some(strip) = strip {
            strip_paths(&mut manifest, strip);
        }

        let mut output = Manifest::new();
        output.insert("main", Value::String(main.to_string()));
        output.insert("types", Value::String(types.to_string()));

        for section in self.sections.iter() {
            if section == "main" || section == "types" {
                continue;
            }
            if let Some(value) = manifest.get(section) {
                output.insert(section, value.clone());
            }
        }

        let dropped: Vec<&str> = manifest
            .field_names()
            .filter(|name| !self.sections.contains(name))
            .collect();
        if !dropped.is_empty() {
            debug!("Dropping fields not on the allow-list: {}", dropped.join(", "));
        }

        output
    }
}

impl Default for ManifestTransformer {
    fn default() -> Self {
        Self::new(SectionAllowList::new())
    }
}

fn strip_paths(manifest: &mut Manifest, strip: &PrefixStrip) {
    for field in STRIPPED_STRING_FIELDS {
        if let Some(value) = manifest.get_mut(field) {
            if !strip.strip_string_value(value) {
                debug!("Leaving non-string `{}` unchanged", field);
            }
        }
    }

    for field in STRIPPED_TREE_FIELDS {
        if let Some(value) = manifest.get_mut(field) {
            strip.strip_tree(value);
        }
    }

    debug!("Stripped prefix `{}` from path fields", strip.prefix());
}

/// Copies `<input_folder>/package.json` to `output_folder` using the
/// standard sections plus `custom_sections`.
pub fn copy_package_json(
    input_folder: impl AsRef<Path>,
    output_folder: impl AsRef<Path>,
    main: &str,
    types: &str,
    custom_sections: &[String],
    strip: Option<&str>,
) -> Result<PathBuf> {
    let transformer =
        ManifestTransformer::new(SectionAllowList::with_custom_sections(custom_sections.iter().cloned()));

    transformer.transform(&TransformRequest {
        input_folder: input_folder.as_ref().to_path_buf(),
        output_folder: output_folder.as_ref().to_path_buf(),
        main: main.to_string(),
        types: types.to_string(),
        strip: strip.map(str::to_string),
    })
}
