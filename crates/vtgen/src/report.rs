use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Config,
    Emit,
    Check,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub stage: Stage,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputStats {
    pub lines: usize,
    pub bytes: usize,
    pub sha256: String,
}

impl OutputStats {
    pub fn for_source(src: &str) -> Self {
        Self {
            lines: src.lines().count(),
            bytes: src.len(),
            sha256: sha256_hex(src.as_bytes()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToolReport {
    pub schema_version: &'static str,
    pub command: &'static str,
    pub ok: bool,
    pub target: String,
    pub mode: &'static str,
    pub max_elements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputStats>,
    pub diagnostics_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    pub exit_code: u8,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    let digest = h.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
