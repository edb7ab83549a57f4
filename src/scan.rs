//! Mapping source discovery
//!
//! Walks a directory for mapping documents and identifies the XSD each one
//! must be validated against.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::BootError;
use crate::xsd::{MappingDocumentHeader, MappingXsdSupport, XsdDescriptor};

/// A mapping document found on disk
#[derive(Debug)]
pub struct DiscoveredMapping<'r> {
    pub path: PathBuf,
    pub descriptor: &'r XsdDescriptor,
}

/// Outcome of a directory scan
#[derive(Debug, Default)]
pub struct ScanReport<'r> {
    pub found: Vec<DiscoveredMapping<'r>>,
    pub failures: Vec<(PathBuf, BootError)>,
}

impl ScanReport<'_> {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Whether a file name looks like a mapping document
pub fn is_mapping_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".hbm.xml") || name == "orm.xml" || name.ends_with(".orm.xml")
}

/// Scan `root` recursively for mapping documents
pub fn scan_directory<'r>(root: &Path, support: &'r MappingXsdSupport) -> ScanReport<'r> {
    let mut report = ScanReport::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_mapping_file(path) {
            continue;
        }

        let identified = MappingDocumentHeader::read(path).and_then(|h| support.identify(&h));
        match identified {
            Ok(descriptor) => {
                debug!(path = %path.display(), version = descriptor.version(), "mapping document");
                report.found.push(DiscoveredMapping {
                    path: path.to_path_buf(),
                    descriptor,
                });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unusable mapping document");
                report.failures.push((path.to_path_buf(), e));
            }
        }
    }

    report
}
