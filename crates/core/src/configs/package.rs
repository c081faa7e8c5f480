use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::TaskdirResult;

/// Dependency declarations found in a group's config entry
#[derive(Debug, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

pub fn parse_package_manifest(json_str: &str) -> TaskdirResult<PackageManifest> {
    let manifest: PackageManifest = serde_json::from_str(json_str)?;
    Ok(manifest)
}
