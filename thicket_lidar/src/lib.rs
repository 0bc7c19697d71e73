// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Lidar: a reader for las2txt-style point-cloud text files.
//!
//! The format is the plain-text output of LAStools' `las2txt`: header lines
//! prefixed with `%` carrying (among other things) the per-axis minima and
//! maxima, followed by one whitespace-separated `x y z` record per line:
//!
//! ```text
//! % file signature:            LASF
//! % min x y z:                 0.0 0.0 -1.5
//! % max x y z:                 500.0 500.0 87.25
//! 12.07 444.91 21.5
//! 13.11 442.83 21.9
//! ```
//!
//! The header bounds are exposed ready-made for the index constructors, and
//! the records come out as `[f64; 3]` rows, which the indexes ingest
//! directly (the z coordinate rides along as payload).
//!
//! This reader exists for test and demo data, not as a serious lidar
//! ingestion path; real pipelines should parse `.las` directly.
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//! use thicket_lidar::PointCloud;
//!
//! let file = "\
//! % min x y z:  0.0 0.0 1.0
//! % max x y z:  10.0 10.0 3.0
//! 1.0 2.0 1.5
//! 9.0 8.5 2.5
//! ";
//! let cloud = PointCloud::from_reader(Cursor::new(file))?;
//! assert_eq!(cloud.len(), 2);
//! assert_eq!(cloud.xy_bounds(), (0.0, 10.0, 0.0, 10.0));
//! # Ok::<(), thicket_lidar::ReadError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Errors produced while reading a point-cloud file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The file could not be opened or read.
    #[error("failed to read {path}")]
    Io {
        /// Path as passed by the caller.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No `min x y z` / `max x y z` header pair was found.
    #[error("missing min/max header lines")]
    MissingHeader,

    /// A record line did not hold exactly three coordinates.
    #[error("line {line}: expected three coordinates")]
    MalformedRecord {
        /// 1-based line number.
        line: usize,
    },

    /// A coordinate failed to parse as a float.
    #[error("line {line}: invalid number {token:?}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
}

/// A parsed point cloud: records plus the header's per-axis bounds.
#[derive(Clone, Debug)]
pub struct PointCloud {
    points: Vec<[f64; 3]>,
    min: [f64; 3],
    max: [f64; 3],
}

impl PointCloud {
    /// Read a cloud from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let wrap_io = |source| ReadError::Io {
            path: path.display().to_string(),
            source,
        };
        let file = File::open(path).map_err(wrap_io)?;
        Self::parse(BufReader::new(file), wrap_io)
    }

    /// Read a cloud from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ReadError> {
        Self::parse(reader, |e| ReadError::Io {
            path: "<reader>".into(),
            source: e,
        })
    }

    fn parse<R, W>(reader: R, wrap_io: W) -> Result<Self, ReadError>
    where
        R: BufRead,
        W: Fn(std::io::Error) -> ReadError,
    {
        let mut min = None;
        let mut max = None;
        let mut points = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(&wrap_io)?;
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(header) = trimmed.strip_prefix('%') {
                Self::parse_header(header, line_no, &mut min, &mut max)?;
            } else {
                points.push(Self::parse_record(trimmed, line_no)?);
            }
        }

        match (min, max) {
            (Some(min), Some(max)) => Ok(Self { points, min, max }),
            _ => Err(ReadError::MissingHeader),
        }
    }

    /// Recognize the `min x y z` / `max x y z` header keys; other header
    /// lines pass through untouched. Only the first three numeric fields
    /// count; anything after them is ignored.
    fn parse_header(
        header: &str,
        line: usize,
        min: &mut Option<[f64; 3]>,
        max: &mut Option<[f64; 3]>,
    ) -> Result<(), ReadError> {
        let mut tokens = header.split_whitespace();
        let key = tokens.next();
        let slot = match key {
            Some("min") => &mut *min,
            Some("max") => &mut *max,
            _ => return Ok(()),
        };
        // Skip the axis-name tokens ("x y z:" or "x y z").
        let mut values = tokens.skip_while(|t| t.parse::<f64>().is_err());
        let mut out = [0.0; 3];
        for axis in &mut out {
            let token = values
                .next()
                .ok_or(ReadError::MalformedRecord { line })?;
            *axis = token.parse().map_err(|_| ReadError::InvalidNumber {
                line,
                token: token.to_string(),
            })?;
        }
        *slot = Some(out);
        Ok(())
    }

    fn parse_record(line: &str, line_no: usize) -> Result<[f64; 3], ReadError> {
        let mut out = [0.0; 3];
        let mut tokens = line.split_whitespace();
        for slot in &mut out {
            let token = tokens
                .next()
                .ok_or(ReadError::MalformedRecord { line: line_no })?;
            *slot = token.parse().map_err(|_| ReadError::InvalidNumber {
                line: line_no,
                token: token.to_string(),
            })?;
        }
        if tokens.next().is_some() {
            return Err(ReadError::MalformedRecord { line: line_no });
        }
        Ok(out)
    }

    /// The parsed records, in file order.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Consume the cloud, keeping only the records.
    pub fn into_points(self) -> Vec<[f64; 3]> {
        self.points
    }

    /// Per-axis minima from the header.
    pub fn min(&self) -> [f64; 3] {
        self.min
    }

    /// Per-axis maxima from the header.
    pub fn max(&self) -> [f64; 3] {
        self.max
    }

    /// Header bounds shaped for the index constructors:
    /// `(x0, x1, y0, y1)`.
    pub fn xy_bounds(&self) -> (f64, f64, f64, f64) {
        (self.min[0], self.max[0], self.min[1], self.max[1])
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud holds no records.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
% file signature:            LASF
% number of point records:   4
% min x y z:                 0.0 0.0 -1.5
% max x y z:                 16.0 16.0 8.25
0.5 0.5 1.0
15.9 0.1 2.0
8.0 8.0 -1.5
3.25 12.75 8.25
";

    #[test]
    fn parses_records_and_bounds() {
        let cloud = PointCloud::from_reader(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud.points()[0], [0.5, 0.5, 1.0]);
        assert_eq!(cloud.min(), [0.0, 0.0, -1.5]);
        assert_eq!(cloud.max(), [16.0, 16.0, 8.25]);
        assert_eq!(cloud.xy_bounds(), (0.0, 16.0, 0.0, 16.0));
    }

    #[test]
    fn unknown_header_lines_are_ignored() {
        let text = "% generating software: things\n% min x y z: 0 0 0\n% max x y z: 1 1 1\n0.5 0.5 0.5\n";
        let cloud = PointCloud::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(cloud.len(), 1);
    }

    #[test]
    fn extra_header_fields_are_ignored() {
        let text = "\
% min x y z:  0.0 0.0 -1.5 extra trailing words
% max x y z:  16.0 16.0 8.25 99.0
1.0 2.0 3.0
";
        let cloud = PointCloud::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(cloud.min(), [0.0, 0.0, -1.5]);
        assert_eq!(cloud.max(), [16.0, 16.0, 8.25]);
    }

    #[test]
    fn missing_header_is_an_error() {
        let err = PointCloud::from_reader(Cursor::new("1 2 3\n")).unwrap_err();
        assert!(matches!(err, ReadError::MissingHeader));
    }

    #[test]
    fn short_record_is_an_error() {
        let text = "% min x y z: 0 0 0\n% max x y z: 1 1 1\n0.5 0.5\n";
        let err = PointCloud::from_reader(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, ReadError::MalformedRecord { line: 3 }));
    }

    #[test]
    fn junk_coordinate_is_an_error() {
        let text = "% min x y z: 0 0 0\n% max x y z: 1 1 1\n0.5 apples 0.5\n";
        let err = PointCloud::from_reader(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, ReadError::InvalidNumber { line: 3, .. }));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "% min x y z: 0 0 0\n% max x y z: 2 2 2\n\n1 1 1\n\n";
        let cloud = PointCloud::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(cloud.len(), 1);
    }
}
