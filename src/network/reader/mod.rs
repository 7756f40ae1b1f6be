// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use graph_builder::GraphBuilder;

use crate::Graph;

mod graph_builder;
mod model;

/// Format of the input network document
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the compression based on the first bytes of the content
    #[default]
    Unknown,

    /// Force uncompressed JSON
    Json,

    /// Force JSON with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    JsonGz,

    /// Force JSON with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    JsonBz2,
}

impl FileFormat {
    /// Guesses the format of a document from its first few bytes.
    pub fn detect(head: &[u8]) -> Self {
        if head.starts_with(&[0x1f, 0x8b]) {
            Self::JsonGz
        } else if head.starts_with(b"BZh") {
            Self::JsonBz2
        } else {
            Self::Json
        }
    }
}

/// Additional controls for interpreting a network document as a routing [Graph].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,

    /// Repair incomplete documents:
    /// - derive missing travel times from distances (at 30 km/h),
    /// - flag self-loop edges as transfer edges,
    /// - add missing transfer edges for all transfer pairs of transfer stations,
    /// - rebuild the adjacency index from the edges.
    ///
    /// Otherwise, the document is taken as-is, including its adjacency index.
    pub repair: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file_format: FileFormat::Unknown,
            repair: true,
        }
    }
}

/// Error conditions which may occur when loading a network document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a network document from a reader into a [Graph] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn add_network_from_io<R: io::Read>(
    g: &mut Graph,
    options: &Options,
    reader: R,
) -> Result<(), Error> {
    let mut b = io::BufReader::new(reader);
    let format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        format => format,
    };

    let doc: model::Document = match format {
        FileFormat::Unknown | FileFormat::Json => serde_json::from_reader(b)?,

        FileFormat::JsonGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            serde_json::from_reader(io::BufReader::new(d))?
        }

        FileFormat::JsonBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            serde_json::from_reader(io::BufReader::new(d))?
        }
    };

    GraphBuilder::new(g, options).add_document(doc);
    Ok(())
}

/// Parse a network document from a file at the provided path into a [Graph]
/// as per the provided [Options].
pub fn add_network_from_file<P: AsRef<Path>>(
    g: &mut Graph,
    options: &Options,
    path: P,
) -> Result<(), Error> {
    let f = File::open(path)?;
    add_network_from_io(g, options, f)
}

/// Parse a network document from a static buffer into a [Graph] as per the provided [Options].
pub fn add_network_from_buffer(g: &mut Graph, options: &Options, data: &[u8]) -> Result<(), Error> {
    let format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(data),
        format => format,
    };

    if format == FileFormat::Json {
        // Fast path is available for in-memory JSON data
        let doc: model::Document = serde_json::from_slice(data)?;
        GraphBuilder::new(g, options).add_document(doc);
        Ok(())
    } else {
        // Wrap the buffer in a cursor and use the IO path
        let cursor = io::Cursor::new(data);
        add_network_from_io(g, options, cursor)
    }
}
