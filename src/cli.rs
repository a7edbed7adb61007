use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::sections::SectionAllowList;
use crate::transform::{ManifestTransformer, TransformRequest};

#[derive(Parser, Debug)]
#[command(name = "pkgjson-copy")]
#[command(about = "Copy package.json into a build output folder, keeping only publishable fields")]
#[command(version)]
pub struct Cli {
    /// Folder containing the source package.json
    pub input_folder: PathBuf,

    /// Folder the rewritten package.json is written to (must exist)
    pub output_folder: PathBuf,

    /// Value for the output `main` field
    #[arg(long)]
    pub main: String,

    /// Value for the output `types` field
    #[arg(long)]
    pub types: String,

    /// Extra top-level fields to keep, beyond the standard ones
    #[arg(long = "custom-section", value_delimiter = ',')]
    pub custom_sections: Vec<String>,

    /// Prefix removed from main, types, module, typesVersions and exports paths
    #[arg(long)]
    pub strip: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn request(&self) -> TransformRequest {
        TransformRequest {
            input_folder: self.input_folder.clone(),
            output_folder: self.output_folder.clone(),
            main: self.main.clone(),
            types: self.types.clone(),
            strip: self.strip.clone(),
        }
    }

    pub fn allow_list(&self) -> SectionAllowList {
        SectionAllowList::with_custom_sections(self.custom_sections.iter().cloned())
    }
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let transformer = ManifestTransformer::new(cli.allow_list());
    transformer.transform(&cli.request())?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "pkgjson_copy=debug"
    } else {
        "pkgjson_copy=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Ignore a second init, e.g. when run_cli is driven more than once in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "pkgjson-copy",
            "src-pkg",
            "dist",
            "--main",
            "index.js",
            "--types",
            "index.d.ts",
            "--custom-section",
            "sideEffects,gypfile",
            "--custom-section",
            "exports",
            "--strip",
            "dist/",
        ])
        .unwrap();

        let request = cli.request();
        assert_eq!(request.input_folder, PathBuf::from("src-pkg"));
        assert_eq!(request.output_folder, PathBuf::from("dist"));
        assert_eq!(request.main, "index.js");
        assert_eq!(request.types, "index.d.ts");
        assert_eq!(request.strip.as_deref(), Some("dist/"));
        assert_eq!(cli.custom_sections, vec!["sideEffects", "gypfile", "exports"]);

        let list = cli.allow_list();
        assert!(list.contains("sideEffects"));
        assert!(list.contains("gypfile"));
    }

    #[test]
    fn test_strip_and_custom_sections_are_optional() {
        let cli = Cli::try_parse_from([
            "pkgjson-copy",
            "in",
            "out",
            "--main",
            "a.js",
            "--types",
            "a.d.ts",
        ])
        .unwrap();

        assert!(cli.strip.is_none());
        assert!(cli.custom_sections.is_empty());
        assert_eq!(cli.allow_list(), SectionAllowList::new());
    }

    #[test]
    fn test_main_and_types_are_required() {
        assert!(Cli::try_parse_from(["pkgjson-copy", "in", "out", "--main", "a.js"]).is_err());
        assert!(Cli::try_parse_from(["pkgjson-copy", "in", "out", "--types", "a.d.ts"]).is_err());
    }
}
