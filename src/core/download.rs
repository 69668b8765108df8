use crate::core::config::InstallerConfig;
use crate::core::messages::SUCCESS_MESSAGE;
use crate::core::purchase::VerificationResult;
use crate::core::report::ReportSink;
use crate::error::{CourseError, Result};
use crate::utils::fs;
use reqwest::blocking::Client;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use zip::ZipArchive;

pub const ARCHIVE_NAME: &str = "course.zip";
pub const COURSE_DIR_NAME: &str = "course";

/// Fetches a remote archive onto disk.
pub trait ArchiveFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<()>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &InstallerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    fn stream_to(&self, url: &str, destination: &Path) -> Result<u64> {
        let mut response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(CourseError::DownloadError {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let mut file = File::create(destination)?;
        Ok(std::io::copy(&mut response, &mut file)?)
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<()> {
        tracing::info!(url, destination = %destination.display(), "downloading archive");

        match self.stream_to(url, destination) {
            Ok(bytes) => {
                tracing::debug!(bytes, "download finished");
                Ok(())
            }
            Err(e) => {
                // Partial downloads are not resumable, drop them.
                if let Err(cleanup) = fs::remove_file_if_exists(destination) {
                    tracing::warn!(
                        path = %destination.display(),
                        error = %cleanup,
                        "failed to remove partial download"
                    );
                }
                Err(match e {
                    CourseError::Http(err) => CourseError::DownloadError {
                        url: url.to_string(),
                        reason: err.to_string(),
                    },
                    other => other,
                })
            }
        }
    }
}

/// Downloads the archive behind `purchase` to `<dir>/course.zip`.
///
/// Checks, in order, that there is a download link and that `dir` exists.
/// Nothing is written when either check fails.
pub fn download_zip_from_link(
    purchase: &VerificationResult,
    dir: &Path,
    fetcher: &dyn ArchiveFetcher,
) -> Result<PathBuf> {
    if purchase.download_link.is_empty() {
        return Err(CourseError::MissingDownloadLink {
            payment_id: purchase.payment_id.clone(),
        });
    }

    if !dir.is_dir() {
        return Err(CourseError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let archive_path = dir.join(ARCHIVE_NAME);
    fetcher.fetch(&purchase.download_link, &archive_path)?;
    Ok(archive_path)
}

/// Extracts `archive_path` into `destination`. Entries already written stay
/// in place if a later entry fails.
pub fn unzip_course(archive_path: &Path, destination: &Path) -> Result<()> {
    if !archive_path.is_file() {
        return Err(CourseError::FileNotFound {
            path: archive_path.to_path_buf(),
        });
    }

    tracing::info!(
        archive = %archive_path.display(),
        destination = %destination.display(),
        "extracting archive"
    );

    fs::ensure_dir_exists(destination)?;

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let outpath = match entry.enclosed_name() {
            Some(path) => destination.join(path),
            None => {
                tracing::warn!(name = entry.name(), "skipping entry outside destination");
                continue;
            }
        };

        if entry.is_dir() {
            fs::ensure_dir_exists(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::ensure_dir_exists(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut entry, &mut outfile)?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(())
}

/// Download, extract into `<dir>/course`, delete the archive, report success.
pub fn install_course(
    purchase: &VerificationResult,
    dir: &Path,
    fetcher: &dyn ArchiveFetcher,
    sink: &mut dyn ReportSink,
) -> Result<PathBuf> {
    let archive_path = download_zip_from_link(purchase, dir, fetcher)?;
    let course_dir = dir.join(COURSE_DIR_NAME);

    unzip_course(&archive_path, &course_dir)?;
    fs::remove_file_if_exists(&archive_path)?;

    sink.info(SUCCESS_MESSAGE);
    Ok(course_dir)
}
