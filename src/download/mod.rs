//! Prebuilt executable downloads into the bin directory.
//!
//! For tools published as plain single-file executables. Archive
//! handling is out of scope; callers that need to unpack something
//! first do it through the post-download hook.

use crate::error::{Result, ToolshedError};
use crate::install::ensure_bin_dir;
use crate::search::{PathStyle, SearchContext};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Called after downloading, with the path to the downloaded file.
/// Returns the path to the binary that should land in the bin
/// directory.
pub type PostDownloadHook = Box<dyn Fn(&Path) -> Result<PathBuf>>;

/// Options for [`download_to_bin`].
#[derive(Default)]
pub struct DownloadOptions {
    /// URL with `{version}`, `{os}`, `{arch}` and `{ext}` placeholders,
    /// e.g. `https://get.example.com/{version}/tool-{os}-{arch}{ext}`.
    pub url_template: String,

    /// Name of the binary, excluding the OS-specific suffix.
    pub name: String,

    /// Replaces `{version}` in the template.
    pub version: String,

    /// Replaces `{ext}` in the template. Defaults to the executable
    /// suffix for the current OS.
    pub ext: Option<String>,

    /// Maps the host OS name to the keyword the download URL uses
    /// (e.g. `macos` -> `darwin`).
    pub os_replacement: HashMap<String, String>,

    /// Maps the host architecture to the keyword the download URL uses
    /// (e.g. `x86_64` -> `amd64`).
    pub arch_replacement: HashMap<String, String>,

    /// Called after the download completes, before the binary is moved
    /// into place.
    pub hook: Option<PostDownloadHook>,
}

impl DownloadOptions {
    /// Options for downloading `name` from `url_template`.
    pub fn new(url_template: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Download an executable into the context's bin directory, making sure
/// the directory exists and is on the search path.
///
/// Returns the path the binary landed at. The download blocks until
/// complete; no timeout is enforced.
pub fn download_to_bin(ctx: &mut SearchContext, opts: &DownloadOptions) -> Result<PathBuf> {
    let url = render_template(&opts.url_template, opts, ctx.style());
    tracing::info!("downloading {}", url);

    let dest_dir = ensure_bin_dir(ctx)?;

    // Unique per process and per call, so concurrent downloads of the
    // same tool name cannot collide in the staging directory.
    use std::sync::atomic::{AtomicU64, Ordering};
    static STAGED: AtomicU64 = AtomicU64::new(0);
    let staged = std::env::temp_dir().join(format!(
        "toolshed-{}-{}-{}",
        std::process::id(),
        STAGED.fetch_add(1, Ordering::Relaxed),
        opts.name
    ));
    fetch_to_file(&url, &staged)?;

    let binary = match &opts.hook {
        Some(hook) => hook(&staged)?,
        None => staged.clone(),
    };
    make_executable(&binary)?;

    let dest = dest_dir.join(format!("{}{}", opts.name, ctx.style().exe_suffix()));
    move_file(&binary, &dest)?;
    Ok(dest)
}

/// Expand the `{version}`, `{os}`, `{arch}` and `{ext}` placeholders.
pub fn render_template(template: &str, opts: &DownloadOptions, style: PathStyle) -> String {
    let os = std::env::consts::OS;
    let os = opts
        .os_replacement
        .get(os)
        .map(String::as_str)
        .unwrap_or(os);
    let arch = std::env::consts::ARCH;
    let arch = opts
        .arch_replacement
        .get(arch)
        .map(String::as_str)
        .unwrap_or(arch);
    let ext = opts.ext.as_deref().unwrap_or(style.exe_suffix());

    template
        .replace("{version}", &opts.version)
        .replace("{os}", os)
        .replace("{arch}", arch)
        .replace("{ext}", ext)
}

fn fetch_to_file(url: &str, path: &Path) -> Result<()> {
    let download_err = |message: String| ToolshedError::DownloadFailed {
        url: url.to_string(),
        message,
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("toolshed/", env!("CARGO_PKG_VERSION")))
        // Downloads block until complete.
        .timeout(None::<std::time::Duration>)
        .build()
        .map_err(|err| download_err(err.to_string()))?;

    let mut response = client
        .get(url)
        .send()
        .map_err(|err| download_err(err.to_string()))?;
    if !response.status().is_success() {
        return Err(download_err(format!("HTTP {}", response.status())));
    }

    let mut file = fs::File::create(path)?;
    response
        .copy_to(&mut file)
        .map_err(|err| download_err(err.to_string()))?;
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Rename, falling back to copy for cross-device moves.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    let _ = fs::remove_file(from);
    Ok(())
}
