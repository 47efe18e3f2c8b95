//! Document I/O
//!
//! Inputs and outputs are either a filesystem path or a caller-owned
//! stream. Paths are opened and closed within a call; streams are only
//! borrowed.

use crate::types::*;
use lopdf::Document;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

/// A readable, seekable byte stream
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Where the source document comes from
pub enum Source<'a> {
    Path(PathBuf),
    Stream(&'a mut dyn ReadSeek),
}

impl Source<'_> {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// Where the output document goes
pub enum Sink<'a> {
    Path(PathBuf),
    Stream(&'a mut dyn Write),
}

impl Sink<'_> {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Sink::Path(path.into())
    }
}

impl fmt::Debug for Sink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Sink::Stream(_) => f.write_str("Stream"),
        }
    }
}

// =============================================================================
// Output Resolution
// =============================================================================

/// Pattern tokens understood by [`render_output_pattern`]
const PATTERN_TOKENS: [&str; 4] = ["dirname", "base", "ext", "n"];

/// Decide where the output goes.
///
/// A given sink wins. Otherwise a path source gets a derived path from
/// `pattern`, and a stream source is rejected because there is nothing to
/// derive a name from.
pub fn resolve_output<'a>(
    source: &Source<'_>,
    sink: Option<Sink<'a>>,
    pattern: &str,
    n: usize,
) -> Result<Sink<'a>> {
    match (sink, source) {
        (Some(sink), _) => Ok(sink),
        (None, Source::Path(input)) => Ok(Sink::Path(render_output_pattern(pattern, input, n)?)),
        (None, Source::Stream(_)) => Err(NupError::Validation(
            "output target required for stream input".to_string(),
        )),
    }
}

/// Expand an output name pattern for `input`.
///
/// Tokens: `{dirname}` (the input's directory, `.` if none), `{base}` (file
/// name without extension), `{ext}` (extension including the dot, or empty)
/// and `{n}`. A result that does not use `{dirname}` is placed next to the
/// input file.
pub fn render_output_pattern(pattern: &str, input: &Path, n: usize) -> Result<PathBuf> {
    check_output_pattern(pattern)?;

    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    let dirname = if parent.as_os_str().is_empty() {
        ".".to_string()
    } else {
        parent.to_string_lossy().into_owned()
    };
    let base = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let rendered = pattern
        .replace("{dirname}", &dirname)
        .replace("{base}", &base)
        .replace("{ext}", &ext)
        .replace("{n}", &n.to_string());

    let path = if pattern.contains("{dirname}") {
        PathBuf::from(rendered)
    } else {
        parent.join(rendered)
    };

    if same_file(&path, input) {
        return Err(NupError::Configuration(format!(
            "output pattern '{}' would overwrite the input {}",
            pattern,
            input.display()
        )));
    }

    Ok(path)
}

/// Whether `a` and `b` name the same file.
///
/// Paths are compared without a leading `.` component, then by file name
/// within their canonicalized directories when both directories exist.
fn same_file(a: &Path, b: &Path) -> bool {
    fn without_cur_dir(path: &Path) -> PathBuf {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }

    fn canonical_dir(path: &Path) -> Option<PathBuf> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::canonicalize(parent).ok()
    }

    if without_cur_dir(a) == without_cur_dir(b) {
        return true;
    }

    match (canonical_dir(a), canonical_dir(b)) {
        (Some(dir_a), Some(dir_b)) => dir_a == dir_b && a.file_name() == b.file_name(),
        _ => false,
    }
}

/// Check that a pattern only uses known tokens and names a file
pub fn check_output_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(NupError::Configuration(
            "output pattern is empty".to_string(),
        ));
    }

    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| {
            NupError::Configuration(format!("unclosed '{{' in output pattern '{}'", pattern))
        })?;
        let token = &after[..end];
        if !PATTERN_TOKENS.contains(&token) {
            return Err(NupError::Configuration(format!(
                "unknown token '{{{}}}' in output pattern '{}'; expected one of {{dirname}}, {{base}}, {{ext}}, {{n}}",
                token, pattern
            )));
        }
        rest = &after[end + 1..];
    }

    Ok(())
}

// =============================================================================
// Reading and Writing
// =============================================================================

/// Read and parse the source document.
///
/// Streams are read from their start: PDF cross-reference offsets are
/// absolute, so a partially consumed stream cannot be parsed.
pub fn read_document(source: &mut Source<'_>) -> Result<Document> {
    let bytes = match source {
        Source::Path(path) => std::fs::read(path)?,
        Source::Stream(stream) => {
            stream.seek(SeekFrom::Start(0))?;
            let mut bytes = Vec::new();
            stream.read_to_end(&mut bytes)?;
            bytes
        }
    };
    Ok(Document::load_mem(&bytes)?)
}

/// Write `doc` to the sink.
///
/// Paths are created or truncated and closed before returning. Streams are
/// flushed and left positioned at the end of the written content.
pub fn write_document(sink: &mut Sink<'_>, doc: &mut Document) -> Result<()> {
    match sink {
        Sink::Path(path) => {
            let mut writer = BufWriter::new(File::create(&*path)?);
            doc.save_to(&mut writer)?;
            writer.flush()?;
        }
        Sink::Stream(stream) => {
            doc.save_to(stream)?;
            stream.flush()?;
        }
    }
    Ok(())
}

// =============================================================================
// Async Helpers
// =============================================================================

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Save a document to a path
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, NupError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
