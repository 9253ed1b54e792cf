//! Delivery of an assembled PDF: platform share when available, local save
//! otherwise.

use chrono::Local;
use latebook_core::Result;
use log::info;
use std::fs;
use std::path::PathBuf;

/// A platform sharing mechanism (share sheet, send-to dialog).
pub trait ShareTarget {
    /// Hand the document to the platform, returning a human-readable
    /// destination description.
    ///
    /// # Errors
    /// I/O or platform errors from the underlying share mechanism.
    fn share(&self, file_name: &str, bytes: &[u8]) -> Result<String>;
}

/// Delivery capabilities of the current platform.
pub struct Platform<'a> {
    /// Directory used for plain saves.
    pub download_dir: PathBuf,
    /// Native share mechanism, when the platform offers one.
    pub share: Option<&'a dyn ShareTarget>,
}

/// Where the document ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivered {
    /// Written to a local file.
    Saved(PathBuf),
    /// Handed to the platform share mechanism.
    Shared(String),
}

/// Deliver `bytes` under `base_name` (extension added here).
///
/// Sharing is preferred when the platform supports it; shared files get a
/// timestamp suffix so repeated shares of the same report never collide.
/// Whitespace in the name becomes underscores either way.
///
/// # Errors
/// I/O errors from the save path, or whatever the share target reports.
pub fn deliver(bytes: &[u8], base_name: &str, platform: &Platform<'_>) -> Result<Delivered> {
    let stem = sanitize(base_name);

    if let Some(target) = platform.share {
        let file_name = format!("{stem}_{}.pdf", Local::now().timestamp_millis());
        let destination = target.share(&file_name, bytes)?;
        info!("shared {file_name} via {destination}");
        return Ok(Delivered::Shared(destination));
    }

    let path = platform.download_dir.join(format!("{stem}.pdf"));
    fs::write(&path, bytes)?;
    info!("saved report to {}", path.display());
    Ok(Delivered::Saved(path))
}

fn sanitize(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingShare {
        seen: RefCell<Vec<String>>,
    }

    impl ShareTarget for RecordingShare {
        fn share(&self, file_name: &str, _bytes: &[u8]) -> Result<String> {
            self.seen.borrow_mut().push(file_name.to_string());
            Ok("share-sheet".to_string())
        }
    }

    #[test]
    fn test_save_sanitizes_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let platform = Platform { download_dir: dir.path().to_path_buf(), share: None };

        let delivered = deliver(b"%PDF-", "late report  2024-01", &platform).unwrap();
        match delivered {
            Delivered::Saved(path) => {
                assert_eq!(path.file_name().unwrap(), "late_report_2024-01.pdf");
                assert_eq!(fs::read(&path).unwrap(), b"%PDF-");
            }
            Delivered::Shared(_) => panic!("expected a saved file"),
        }
    }

    #[test]
    fn test_share_preferred_and_suffixed() {
        let dir = tempfile::tempdir().unwrap();
        let share = RecordingShare { seen: RefCell::new(Vec::new()) };
        let platform = Platform {
            download_dir: dir.path().to_path_buf(),
            share: Some(&share),
        };

        let delivered = deliver(b"%PDF-", "daily report", &platform).unwrap();
        assert_eq!(delivered, Delivered::Shared("share-sheet".to_string()));

        let seen = share.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("daily_report_"));
        assert!(seen[0].ends_with(".pdf"));
        // Nothing written locally when sharing.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_share_names_differ_across_calls() {
        let share = RecordingShare { seen: RefCell::new(Vec::new()) };
        let platform = Platform { download_dir: PathBuf::new(), share: Some(&share) };

        deliver(b"x", "r", &platform).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        deliver(b"x", "r", &platform).unwrap();

        let seen = share.seen.borrow();
        assert_ne!(seen[0], seen[1]);
    }
}
