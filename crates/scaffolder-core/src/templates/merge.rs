//! Field-level merge for the project manifest (`package.json`)
//!
//! The destination always wins on conflicting leaves: the template may only
//! add keys the destination lacks, descending into objects present on both
//! sides. Arrays and scalars are leaves.

use crate::atomic::write_atomic;
use crate::error::{IoOp, ManifestSide, Result, ScaffoldError};
use crate::naming::INITIAL_VERSION;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Merge `template` into `dest` in place
pub fn merge_documents(dest: &mut Value, template: &Value) {
    let (Value::Object(dest_map), Value::Object(template_map)) = (dest, template) else {
        return;
    };

    for (key, template_value) in template_map {
        match dest_map.get_mut(key) {
            None => {
                dest_map.insert(key.clone(), template_value.clone());
            }
            Some(dest_value) => merge_documents(dest_value, template_value),
        }
    }
}

/// The document written into a fresh target before any template is rendered
pub fn initial_manifest(package_name: &str) -> Value {
    let mut map = Map::new();
    map.insert("name".to_string(), Value::String(package_name.to_string()));
    map.insert(
        "version".to_string(),
        Value::String(INITIAL_VERSION.to_string()),
    );
    Value::Object(map)
}

/// Serialize with two-space indentation and a trailing newline
pub fn to_manifest_string(document: &Value) -> String {
    let mut out = serde_json::to_string_pretty(document)
        .expect("serializing a serde_json::Value cannot fail");
    out.push('\n');
    out
}

fn read_document(path: &Path, side: ManifestSide) -> Result<Value> {
    let content = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ScaffoldError::not_found(path)
        } else {
            ScaffoldError::io(IoOp::Read, path)(e)
        }
    })?;
    serde_json::from_slice(&content).map_err(|source| ScaffoldError::Parse {
        side,
        path: path.to_path_buf(),
        source,
    })
}

/// Merge the template manifest at `template_path` into the existing manifest at `dest_path`
pub fn merge_manifest_file(template_path: &Path, dest_path: &Path) -> Result<()> {
    let mut dest = read_document(dest_path, ManifestSide::Destination)?;
    let template = read_document(template_path, ManifestSide::Template)?;

    merge_documents(&mut dest, &template);
    write_atomic(dest_path, to_manifest_string(&dest).as_bytes(), None)?;

    debug!(
        "Merged manifest {} into {}",
        template_path.display(),
        dest_path.display()
    );
    Ok(())
}

/// Write the initial `{name, version}` manifest, merging into one that already exists
pub fn seed_manifest(dest_path: &Path, package_name: &str) -> Result<()> {
    let seed = initial_manifest(package_name);

    let document = match fs::metadata(dest_path) {
        Ok(_) => {
            let mut existing = read_document(dest_path, ManifestSide::Destination)?;
            merge_documents(&mut existing, &seed);
            existing
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => seed,
        Err(e) => return Err(ScaffoldError::io(IoOp::Inspect, dest_path)(e)),
    };

    write_atomic(dest_path, to_manifest_string(&document).as_bytes(), None)?;
    debug!("Seeded manifest {}", dest_path.display());
    Ok(())
}
