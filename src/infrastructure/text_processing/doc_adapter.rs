use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use cfb::CompoundFile;

use crate::application::ports::{ExtractionInput, ExtractorError, TextExtractor};
use crate::domain::{FileType, UploadedDocument};

use super::blocking::{DEFAULT_EXTRACTION_TIMEOUT, run_blocking};
use super::text_sanitizer::join_blocks;

const WORD_DOCUMENT_STREAM: &str = "WordDocument";
const FIB_MAGIC: u16 = 0xA5EC;
const FIB_FLAGS_OFFSET: usize = 0x0A;
const FIB_ENCRYPTED: u16 = 0x0100;
const FIB_WHICH_TABLE: u16 = 0x0200;
const FIB_RG_W_OFFSET: usize = 0x20;
const CCP_TEXT_INDEX: usize = 3;
const FC_CLX_INDEX: usize = 33;

const CLX_PRC: u8 = 0x01;
const CLX_PCDT: u8 = 0x02;
const PCD_SIZE: usize = 8;
const FC_COMPRESSED: u32 = 0x4000_0000;

const FIELD_BEGIN: char = '\u{13}';
const FIELD_SEPARATOR: char = '\u{14}';
const FIELD_END: char = '\u{15}';

/// Word 97-2003 binary documents. Parses the OLE2 container from a scratch
/// file and walks the piece table of the main document text.
pub struct DocAdapter {
    timeout: Duration,
}

impl Default for DocAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn extract_paragraphs(path: &Path) -> Result<Vec<String>, ExtractorError> {
        let mut container = cfb::open(path).map_err(|e| {
            ExtractorError::ExtractionFailed(format!("not an OLE2 compound file: {e}"))
        })?;

        let word_document = read_stream(&mut container, WORD_DOCUMENT_STREAM)?;
        let fib = Fib::parse(&word_document)?;

        let table_name = if fib.which_table_one { "1Table" } else { "0Table" };
        let table = read_stream(&mut container, table_name)?;

        let pieces = read_piece_table(&table, fib.fc_clx, fib.lcb_clx)?;
        let raw = decode_main_text(&word_document, &pieces, fib.ccp_text);

        Ok(split_paragraphs(&strip_field_codes(&raw)))
    }
}

fn read_stream<F: Read + Seek>(
    container: &mut CompoundFile<F>,
    name: &str,
) -> Result<Vec<u8>, ExtractorError> {
    let mut stream = container
        .open_stream(name)
        .map_err(|e| ExtractorError::ExtractionFailed(format!("missing {name} stream: {e}")))?;
    let mut buf = Vec::new();
    stream
        .read_to_end(&mut buf)
        .map_err(|e| ExtractorError::ExtractionFailed(format!("failed to read {name}: {e}")))?;
    Ok(buf)
}

fn read_u16(buf: &[u8], offset: usize) -> Option<u16> {
    buf.get(offset..offset + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
}

fn read_u32(buf: &[u8], offset: usize) -> Option<u32> {
    buf.get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn truncated(what: &str) -> ExtractorError {
    ExtractorError::ExtractionFailed(format!("truncated {what}"))
}

/// The few File Information Block fields needed to reach the text.
#[derive(Debug)]
struct Fib {
    which_table_one: bool,
    ccp_text: u32,
    fc_clx: u32,
    lcb_clx: u32,
}

impl Fib {
    fn parse(word_document: &[u8]) -> Result<Self, ExtractorError> {
        let magic = read_u16(word_document, 0).ok_or_else(|| truncated("FIB"))?;
        if magic != FIB_MAGIC {
            return Err(ExtractorError::ExtractionFailed(format!(
                "not a Word 97-2003 document (FIB magic {magic:#06x})"
            )));
        }

        let flags = read_u16(word_document, FIB_FLAGS_OFFSET).ok_or_else(|| truncated("FIB"))?;
        if flags & FIB_ENCRYPTED != 0 {
            return Err(ExtractorError::ExtractionFailed(
                "document is encrypted".to_string(),
            ));
        }

        // FibBase is followed by three variable-length arrays, each preceded
        // by its element count.
        let csw = read_u16(word_document, FIB_RG_W_OFFSET).ok_or_else(|| truncated("FIB"))?;
        let rg_lw_count_offset = FIB_RG_W_OFFSET + 2 + usize::from(csw) * 2;
        let cslw = read_u16(word_document, rg_lw_count_offset).ok_or_else(|| truncated("FIB"))?;
        let rg_lw_offset = rg_lw_count_offset + 2;
        let fc_lcb_offset = rg_lw_offset + usize::from(cslw) * 4 + 2;

        let ccp_text = read_u32(word_document, rg_lw_offset + CCP_TEXT_INDEX * 4)
            .ok_or_else(|| truncated("FIB"))?;
        let fc_clx = read_u32(word_document, fc_lcb_offset + FC_CLX_INDEX * 8)
            .ok_or_else(|| truncated("FIB"))?;
        let lcb_clx = read_u32(word_document, fc_lcb_offset + FC_CLX_INDEX * 8 + 4)
            .ok_or_else(|| truncated("FIB"))?;

        Ok(Self {
            which_table_one: flags & FIB_WHICH_TABLE != 0,
            ccp_text,
            fc_clx,
            lcb_clx,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    cp_start: u32,
    cp_end: u32,
    fc: u32,
    compressed: bool,
}

fn read_piece_table(table: &[u8], fc_clx: u32, lcb_clx: u32) -> Result<Vec<Piece>, ExtractorError> {
    let start = fc_clx as usize;
    let end = start.saturating_add(lcb_clx as usize);
    let clx = table
        .get(start..end)
        .filter(|clx| !clx.is_empty())
        .ok_or_else(|| ExtractorError::ExtractionFailed("no piece table found".to_string()))?;

    let mut pos = 0;
    while clx.get(pos) == Some(&CLX_PRC) {
        let cb = read_u16(clx, pos + 1).ok_or_else(|| truncated("CLX"))?;
        pos += 3 + usize::from(cb);
    }

    if clx.get(pos) != Some(&CLX_PCDT) {
        return Err(ExtractorError::ExtractionFailed(
            "no piece table found".to_string(),
        ));
    }
    let lcb = read_u32(clx, pos + 1).ok_or_else(|| truncated("CLX"))? as usize;
    let plc = clx
        .get(pos + 5..pos + 5 + lcb)
        .ok_or_else(|| truncated("piece table"))?;

    if plc.len() < 4 {
        return Err(truncated("piece table"));
    }
    let count = (plc.len() - 4) / (4 + PCD_SIZE);
    let pcd_base = (count + 1) * 4;

    let mut pieces = Vec::with_capacity(count);
    for i in 0..count {
        let cp_start = read_u32(plc, i * 4).ok_or_else(|| truncated("piece table"))?;
        let cp_end = read_u32(plc, (i + 1) * 4).ok_or_else(|| truncated("piece table"))?;
        let raw_fc =
            read_u32(plc, pcd_base + i * PCD_SIZE + 2).ok_or_else(|| truncated("piece table"))?;
        pieces.push(Piece {
            cp_start,
            cp_end,
            fc: raw_fc & !FC_COMPRESSED,
            compressed: raw_fc & FC_COMPRESSED != 0,
        });
    }

    Ok(pieces)
}

fn decode_main_text(word_document: &[u8], pieces: &[Piece], ccp_text: u32) -> String {
    let mut text = String::new();

    for piece in pieces {
        if piece.cp_start >= ccp_text {
            break;
        }
        let chars = (piece.cp_end.min(ccp_text).saturating_sub(piece.cp_start)) as usize;

        if piece.compressed {
            let offset = (piece.fc / 2) as usize;
            let end = (offset + chars).min(word_document.len());
            if let Some(bytes) = word_document.get(offset..end) {
                let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                text.push_str(&decoded);
            }
        } else {
            let offset = piece.fc as usize;
            let end = (offset + chars * 2).min(word_document.len());
            if let Some(bytes) = word_document.get(offset..end) {
                let (decoded, _, _) = encoding_rs::UTF_16LE.decode(bytes);
                text.push_str(&decoded);
            }
        }
    }

    text
}

/// Drops field instructions and keeps field results. Fields nest.
fn strip_field_codes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    // One entry per open field: true once its separator has been seen.
    let mut fields: Vec<bool> = Vec::new();

    for ch in raw.chars() {
        match ch {
            FIELD_BEGIN => fields.push(false),
            FIELD_SEPARATOR => {
                if let Some(in_result) = fields.last_mut() {
                    *in_result = true;
                }
            }
            FIELD_END => {
                fields.pop();
            }
            _ if fields.iter().all(|in_result| *in_result) => out.push(ch),
            _ => {}
        }
    }

    out
}

fn split_paragraphs(text: &str) -> Vec<String> {
    text.split('\r')
        .map(|paragraph| {
            paragraph
                .chars()
                .filter_map(|ch| match ch {
                    '\u{0B}' | '\u{0C}' => Some('\n'),
                    '\u{07}' => Some('\t'),
                    '\u{1E}' => Some('-'),
                    '\t' | '\n' => Some(ch),
                    c if c.is_control() => None,
                    c => Some(c),
                })
                .collect()
        })
        .collect()
}

#[async_trait]
impl TextExtractor for DocAdapter {
    fn needs_scratch_file(&self, file_type: FileType) -> bool {
        file_type == FileType::Doc
    }

    #[tracing::instrument(
        skip(self, input),
        fields(document_id = %document.id, filename = %document.filename)
    )]
    async fn extract(
        &self,
        input: ExtractionInput<'_>,
        document: &UploadedDocument,
    ) -> Result<String, ExtractorError> {
        if document.file_type != FileType::Doc {
            return Err(ExtractorError::UnsupportedFormat(
                document.file_type.as_mime().to_string(),
            ));
        }

        let path: PathBuf = input
            .scratch_path
            .ok_or(ExtractorError::ScratchFileRequired)?
            .to_path_buf();

        let paragraphs = run_blocking(self.timeout, FileType::Doc, move || {
            Self::extract_paragraphs(&path)
        })
        .await?;

        tracing::info!(
            paragraph_count = paragraphs.len(),
            "DOC text extraction complete"
        );

        Ok(join_blocks(paragraphs))
    }
}

