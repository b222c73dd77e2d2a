use std::path::PathBuf;

use datafolder_core::LoadError;
use datafolder_server::ServerError;
use snafu::Snafu;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    #[snafu(display("path not found: {}", path.display()))]
    FolderMissing { path: PathBuf },

    #[snafu(display(
        "not a folder: {} (datafolder needs a folder path, not a file)",
        path.display()
    ))]
    NotADirectory { path: PathBuf },

    #[snafu(display("permission denied: {}", path.display()))]
    PermissionDenied { path: PathBuf },

    #[snafu(display("cannot access {}: {source}", path.display()))]
    Inspect {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to load data: {source}"))]
    Load { source: LoadError },

    #[snafu(display(
        "port {port} already in use (try: datafolder {} -p {})",
        folder.display(),
        port.saturating_add(1)
    ))]
    PortInUse { port: u16, folder: PathBuf },

    #[snafu(display("{source}"))]
    Server { source: ServerError },
}
