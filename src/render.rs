//! PDF rendering – hands a finished email document to a headless browser and
//! returns the printed PDF.
//!
//! Every request gets its own renderer process. [`render_pdf`] closes the
//! session on every path, and a session dropped mid-render kills its child.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tempfile::TempDir;

#[derive(Debug)]
pub enum RenderError {
    /// The request carried no HTML.
    NoContent,
    /// The renderer could not be started or did not produce a PDF.
    RenderFailed(String),
}

impl RenderError {
    /// HTTP status a service front-end should answer with.
    pub fn status(&self) -> u16 {
        match self {
            RenderError::NoContent => 400,
            RenderError::RenderFailed(_) => 500,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NoContent => write!(f, "no HTML content provided"),
            RenderError::RenderFailed(msg) => write!(f, "PDF generation failed: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// One isolated renderer instance.
pub trait RenderSession {
    fn render(&mut self, html: &str) -> Result<Vec<u8>, RenderError>;
    /// Release the instance. Called exactly once, even after a failed render.
    fn close(self: Box<Self>);
}

pub trait RenderBackend {
    fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError>;
}

/// Render `html` to PDF bytes with a fresh session from `backend`.
pub fn render_pdf(backend: &dyn RenderBackend, html: &str) -> Result<Vec<u8>, RenderError> {
    if html.trim().is_empty() {
        return Err(RenderError::NoContent);
    }
    let mut session = backend.launch()?;
    let result = session.render(html);
    session.close();
    match &result {
        Ok(pdf) => log::debug!("rendered {} bytes of PDF", pdf.len()),
        Err(e) => log::warn!("{e}"),
    }
    result
}

// ---------------------------------------------------------------------------
// Headless browser backend
// ---------------------------------------------------------------------------

/// Prints through a Chromium-compatible binary
/// (`--headless --print-to-pdf`).
#[derive(Debug, Clone)]
pub struct BrowserBackend {
    pub program: PathBuf,
    pub extra_args: Vec<String>,
}

impl BrowserBackend {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }
}

impl RenderBackend for BrowserBackend {
    fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        let workdir = tempfile::tempdir()
            .map_err(|e| RenderError::RenderFailed(format!("cannot create scratch dir: {e}")))?;
        Ok(Box::new(BrowserSession {
            program: self.program.clone(),
            extra_args: self.extra_args.clone(),
            workdir,
            child: None,
        }))
    }
}

struct BrowserSession {
    program: PathBuf,
    extra_args: Vec<String>,
    workdir: TempDir,
    child: Option<Child>,
}

impl BrowserSession {
    fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", output.display()))
            .args(&self.extra_args)
            .arg(format!("file://{}", input.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl RenderSession for BrowserSession {
    fn render(&mut self, html: &str) -> Result<Vec<u8>, RenderError> {
        let failed = |msg: String| RenderError::RenderFailed(msg);
        let input = self.workdir.path().join("email.html");
        let output = self.workdir.path().join("email.pdf");
        fs::write(&input, html).map_err(|e| failed(format!("cannot stage HTML: {e}")))?;

        let child = self
            .command(&input, &output)
            .spawn()
            .map_err(|e| failed(format!("cannot launch {}: {e}", self.program.display())))?;
        let status = self
            .child
            .insert(child)
            .wait()
            .map_err(|e| failed(format!("renderer did not finish: {e}")))?;
        self.child = None;

        if !status.success() {
            return Err(failed(format!("renderer exited with {status}")));
        }
        let pdf = fs::read(&output).map_err(|e| failed(format!("no PDF produced: {e}")))?;
        if !pdf.starts_with(b"%PDF-") {
            return Err(failed("renderer output is not a PDF".to_string()));
        }
        Ok(pdf)
    }

    fn close(self: Box<Self>) {
        // Drop kills any leftover child and removes the scratch directory.
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            log::warn!("killing unfinished renderer process {}", child.id());
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
