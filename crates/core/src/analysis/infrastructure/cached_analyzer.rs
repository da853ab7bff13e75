use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::analysis::domain::semantic_analyzer::{
    AnalysisError, AnalysisOptions, SemanticAnalyzer,
};
use crate::analysis::domain::semantic_result::SemanticResult;
use crate::shared::constants::APP_DIR_NAME;

/// Replays recent analysis responses from disk.
///
/// Entries are keyed by a fingerprint of `(namespace, text, options)` and
/// expire after `ttl`. The namespace identifies the backing service (endpoint
/// and API version) so responses from one instance never answer for another. The cache only saves round trips: read or write failures fall
/// through to the wrapped analyzer and are logged, never returned.
pub struct CachedAnalyzer {
    inner: Box<dyn SemanticAnalyzer>,
    cache_dir: PathBuf,
    ttl: Duration,
    namespace: String,
}

impl CachedAnalyzer {
    pub fn new(
        inner: Box<dyn SemanticAnalyzer>,
        cache_dir: PathBuf,
        ttl: Duration,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            cache_dir,
            ttl,
            namespace: namespace.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn entry_path(&self, text: &str, options: &AnalysisOptions) -> PathBuf {
        self.cache_dir
            .join(format!("{:016x}.json", fingerprint(&self.namespace, text, options)))
    }

    fn lookup(&self, path: &Path) -> Option<SemanticResult> {
        let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age > self.ttl {
            return None;
        }

        let json = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(result) => Some(result),
            Err(e) => {
                log::debug!("Ignoring unreadable cache entry {}: {e}", path.display());
                None
            }
        }
    }

    fn store(&self, path: &Path, result: &SemanticResult) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)?;
        let json = serde_json::to_vec(result)?;

        // Write to a temp file first, then rename so readers never see a partial entry
        let temp_path = path.with_extension("part");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(&json)?;
        file.flush()?;
        drop(file);
        fs::rename(&temp_path, path)
    }
}

impl SemanticAnalyzer for CachedAnalyzer {
    fn analyze(
        &self,
        text: &str,
        options: &AnalysisOptions,
    ) -> Result<SemanticResult, AnalysisError> {
        let path = self.entry_path(text, options);
        if let Some(result) = self.lookup(&path) {
            log::debug!("Analysis cache hit: {}", path.display());
            return Ok(result);
        }

        let result = self.inner.analyze(text, options)?;
        if let Err(e) = self.store(&path, &result) {
            log::warn!("Failed to cache analysis response at {}: {e}", path.display());
        }
        Ok(result)
    }
}

/// Platform-specific response cache directory.
pub fn response_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join(APP_DIR_NAME).join("responses"))
}

fn fingerprint(namespace: &str, text: &str, options: &AnalysisOptions) -> u64 {
    let mut hasher = DefaultHasher::new();
    namespace.hash(&mut hasher);
    text.hash(&mut hasher);
    options.hash(&mut hasher);
    hasher.finish()
}
