use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};

/// What produced an output file.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub version: &'static str,
    pub callsite: Callsite,
    pub op: String,
    pub params: Value,
    pub outputs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// Write `result` as pretty JSON to `out` and `<stem>.provenance.json` next to it.
///
/// Returns the sidecar path.
#[track_caller]
pub fn write_with_sidecar(out: &Path, op: &str, params: Value, result: &Value) -> Result<PathBuf> {
    let callsite = Location::caller();
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(result)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let doc = Provenance {
        code_rev: code_rev(),
        version: geodraw::VERSION,
        callsite: Callsite {
            file: callsite.file(),
            line: callsite.line(),
        },
        op: op.to_string(),
        params,
        outputs: vec![out.to_string_lossy().into_owned()],
    };
    let sidecar = sidecar_path(out);
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

fn sidecar_path(out: &Path) -> PathBuf {
    let mut name = out
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".provenance.json");
    out.with_file_name(name)
}

/// Build-time `GIT_COMMIT`, else runtime `GIT_COMMIT`, else "unknown".
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}
