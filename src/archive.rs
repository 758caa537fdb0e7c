use std::io::{Cursor, Seek, Write};

use tracing::warn;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{Result, SplitError};

/// Name of the archive entry for the output at 0-based `index`
pub fn part_name(index: usize) -> String {
    format!("split_part_{}.pdf", index + 1)
}

/// Zip `outputs` into a single archive, one `split_part_N.pdf` entry each, in order.
///
/// Entry timestamps are pinned so identical input always yields identical bytes.
pub fn pack(outputs: &[Vec<u8>]) -> Result<Vec<u8>> {
    pack_into(Cursor::new(Vec::new()), outputs).map(Cursor::into_inner)
}

fn pack_into<W: Write + Seek>(writer: W, outputs: &[Vec<u8>]) -> Result<W> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(writer);

    for (index, output) in outputs.iter().enumerate() {
        let entry = part_name(index);
        zip.start_file(entry.as_str(), options)
            .map_err(|e| packaging_failed(&entry, e))?;
        zip.write_all(output)
            .map_err(|e| packaging_failed(&entry, e.into()))?;
    }

    zip.finish()
        .map_err(|e| packaging_failed("central directory", e))
}

fn packaging_failed(entry: &str, source: ZipError) -> SplitError {
    warn!(entry, error = %source, "Failed to write zip entry");
    SplitError::PackagingFailed {
        entry: entry.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Read, SeekFrom};
    use zip::ZipArchive;

    /// Seeks like a buffer but refuses every write.
    #[derive(Default)]
    struct FullDisk {
        inner: Cursor<Vec<u8>>,
    }

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for FullDisk {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    fn entries(archive: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(archive)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = Vec::new();
                file.read_to_end(&mut content).unwrap();
                (file.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn test_part_name() {
        assert_eq!(part_name(0), "split_part_1.pdf");
        assert_eq!(part_name(9), "split_part_10.pdf");
    }

    #[test]
    fn test_entries_in_input_order() {
        let outputs = vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()];
        let archive = pack(&outputs).unwrap();

        assert_eq!(
            entries(&archive),
            vec![
                ("split_part_1.pdf".to_string(), b"first".to_vec()),
                ("split_part_2.pdf".to_string(), b"second".to_vec()),
                ("split_part_3.pdf".to_string(), b"third".to_vec()),
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let outputs = vec![vec![1u8; 512], vec![2u8; 64]];
        assert_eq!(pack(&outputs).unwrap(), pack(&outputs).unwrap());
    }

    #[test]
    fn test_write_failure_is_packaging_failed() {
        let err = pack_into(FullDisk::default(), &[b"first".to_vec(), b"second".to_vec()])
            .err()
            .unwrap();

        assert!(matches!(
            &err,
            SplitError::PackagingFailed { entry, .. }
                if entry == "split_part_1.pdf" || entry == "central directory"
        ));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_empty_archive() {
        let archive = pack(&[]).unwrap();
        assert!(entries(&archive).is_empty());
    }
}
