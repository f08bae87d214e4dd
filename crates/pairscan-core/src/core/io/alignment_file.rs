use super::traits::ScanInputFile;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignmentFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line}: expected two residue indices, found '{content}'")]
    MalformedLine { line: usize, content: String },
}

/// Pairs of corresponding residue positions, one `query_index index_index` pair per line.
///
/// Blank lines and lines starting with `#` are ignored.
pub struct AlignmentFile;

impl ScanInputFile for AlignmentFile {
    type Output = Vec<(usize, usize)>;
    type Error = AlignmentFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<(usize, usize)>, AlignmentFileError> {
        let mut pairs = Vec::new();
        for (line_index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let malformed = || AlignmentFileError::MalformedLine {
                line: line_index + 1,
                content: trimmed.to_string(),
            };
            let mut fields = trimmed.split_whitespace();
            let query = fields.next().and_then(|f| f.parse().ok()).ok_or_else(malformed)?;
            let index = fields.next().and_then(|f| f.parse().ok()).ok_or_else(malformed)?;
            if fields.next().is_some() {
                return Err(malformed());
            }
            pairs.push((query, index));
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_from_skips_comments_and_blank_lines() {
        let content = "# query index\n0 2\n\n1 3\n  5   9  \n";
        let pairs = AlignmentFile::read_from(&mut Cursor::new(content)).unwrap();
        assert_eq!(pairs, vec![(0, 2), (1, 3), (5, 9)]);
    }

    #[test]
    fn read_from_reports_malformed_line_number() {
        let content = "0 2\n1 x\n";
        let result = AlignmentFile::read_from(&mut Cursor::new(content));
        assert!(matches!(
            result,
            Err(AlignmentFileError::MalformedLine { line: 2, .. })
        ));
    }

    #[test]
    fn read_from_rejects_extra_fields() {
        let result = AlignmentFile::read_from(&mut Cursor::new("1 2 3\n"));
        assert!(matches!(result, Err(AlignmentFileError::MalformedLine { .. })));
    }
}
