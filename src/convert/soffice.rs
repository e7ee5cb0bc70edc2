//! Conversion through a headless office suite.

use super::{ConvertOptions, FixedLayoutConverter};
use crate::detect::is_pdf_bytes;
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const DEFAULT_PROGRAM: &str = "soffice";
const INPUT_NAME: &str = "document.docx";
const OUTPUT_NAME: &str = "document.pdf";
const POLL_INTERVAL: Duration = Duration::from_millis(50);
const STDERR_TAIL: usize = 512;

/// Converts docx bytes to pdf by running `soffice --headless --convert-to pdf`.
///
/// Every call works in its own temporary directory, including a private
/// user profile so concurrent conversions do not contend for the same
/// profile lock. The directory is removed when the call returns.
#[derive(Debug, Clone)]
pub struct SofficeConverter {
    program: PathBuf,
}

impl SofficeConverter {
    /// Create a converter that runs `soffice` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
        }
    }

    /// Create a converter that runs the given executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Executable this converter runs.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn spawn(&self, workdir: &Path, input: &Path, outdir: &Path) -> Result<Child> {
        let profile = workdir.join("profile");
        let stderr = File::create(workdir.join("stderr.log"))?;

        Command::new(&self.program)
            .arg(format!("-env:UserInstallation={}", file_url(&profile)))
            .args(["--headless", "--norestore", "--convert-to", "pdf", "--outdir"])
            .arg(outdir)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr))
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    Error::ConversionUnavailable(format!(
                        "cannot start {}: {}",
                        self.program.display(),
                        e
                    ))
                }
                _ => Error::Io(e),
            })
    }
}

impl Default for SofficeConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedLayoutConverter for SofficeConverter {
    fn name(&self) -> &str {
        "soffice"
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn convert(&self, docx: &[u8], options: &ConvertOptions) -> Result<Vec<u8>> {
        let workdir = tempfile::Builder::new().prefix("resumark-").tempdir()?;
        let input = workdir.path().join(INPUT_NAME);
        let outdir = workdir.path().join("out");
        fs::write(&input, docx)?;
        fs::create_dir(&outdir)?;

        log::debug!(
            "Converting {} bytes with {} in {}",
            docx.len(),
            self.program.display(),
            workdir.path().display()
        );

        let mut child = self.spawn(workdir.path(), &input, &outdir)?;
        let status = wait_with_timeout(&mut child, options.timeout)?;

        if !status.success() {
            let stderr = fs::read_to_string(workdir.path().join("stderr.log")).unwrap_or_default();
            return Err(Error::ConversionFailed(format!(
                "{} exited with {}{}",
                self.program.display(),
                status,
                stderr_suffix(&stderr)
            )));
        }

        let output = outdir.join(OUTPUT_NAME);
        let pdf = match fs::read(&output) {
            Ok(pdf) => pdf,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ConversionFailed(format!(
                    "{} produced no output",
                    self.program.display()
                )))
            }
            Err(e) => return Err(e.into()),
        };

        if !is_pdf_bytes(&pdf) {
            return Err(Error::InvalidArtifact("PDF"));
        }

        log::debug!("Converted to {} PDF bytes", pdf.len());
        Ok(pdf)
    }
}

/// Wait for the child, killing it once `timeout` has passed.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            // The child may have exited between the poll and the kill.
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::ConversionTimeout(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn file_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{}", path)
    } else {
        format!("file:///{}", path)
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        return String::new();
    }
    let start = stderr
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| stderr.len() - i <= STDERR_TAIL)
        .unwrap_or(0);
    format!(": {}", &stderr[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_unavailable() {
        let converter = SofficeConverter::with_program("/nonexistent/resumark-soffice");
        assert!(!converter.is_available());

        let err = converter
            .convert(b"PK\x03\x04", &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::ConversionUnavailable(_)));
    }

    #[test]
    fn test_file_url() {
        assert_eq!(file_url(Path::new("/tmp/p")), "file:///tmp/p");
        assert_eq!(file_url(Path::new("C:\\tmp\\p")), "file:///C:/tmp/p");
    }

    #[test]
    fn test_stderr_suffix() {
        assert_eq!(stderr_suffix("  "), "");
        assert_eq!(stderr_suffix("boom\n"), ": boom");
        let long = "x".repeat(2000);
        assert_eq!(stderr_suffix(&long).len(), STDERR_TAIL + 2);
    }

    #[cfg(unix)]
    mod scripted {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        /// Write an executable stand-in for soffice.
        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-soffice");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        const WRITE_PDF: &str = r#"out=""
while [ $# -gt 1 ]; do
  if [ "$1" = "--outdir" ]; then out="$2"; fi
  shift
done
[ -z "$out" ] && exit 0
name=$(basename "$1" .docx)
printf '%%PDF-1.7\n%%%%EOF\n' > "$out/$name.pdf""#;

        #[test]
        fn test_scripted_conversion() {
            let dir = tempfile::tempdir().unwrap();
            let converter = SofficeConverter::with_program(script(dir.path(), WRITE_PDF));
            assert!(converter.is_available());

            let pdf = converter.convert(b"docx", &ConvertOptions::default()).unwrap();
            assert!(pdf.starts_with(b"%PDF-1.7"));
        }

        #[test]
        fn test_scripted_failure() {
            let dir = tempfile::tempdir().unwrap();
            let converter =
                SofficeConverter::with_program(script(dir.path(), "echo broken >&2; exit 3"));
            let err = converter
                .convert(b"docx", &ConvertOptions::default())
                .unwrap_err();
            match err {
                Error::ConversionFailed(message) => assert!(message.ends_with(": broken")),
                other => panic!("unexpected error: {:?}", other),
            }
        }

        #[test]
        fn test_scripted_no_output() {
            let dir = tempfile::tempdir().unwrap();
            let converter = SofficeConverter::with_program(script(dir.path(), "exit 0"));
            let err = converter
                .convert(b"docx", &ConvertOptions::default())
                .unwrap_err();
            assert!(matches!(err, Error::ConversionFailed(_)));
        }

        #[test]
        fn test_scripted_timeout() {
            let dir = tempfile::tempdir().unwrap();
            let converter = SofficeConverter::with_program(script(dir.path(), "exec sleep 10"));
            let options = ConvertOptions::new().with_timeout(Duration::from_millis(200));

            let started = Instant::now();
            let err = converter.convert(b"docx", &options).unwrap_err();
            assert!(matches!(err, Error::ConversionTimeout(_)));
            assert!(started.elapsed() < Duration::from_secs(5));
        }
    }
}
