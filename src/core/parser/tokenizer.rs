use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

/// A stretch of the input: either consecutive non-blank lines or one empty
/// line outside any quoted field.
enum Piece<'a> {
    Text(&'a str),
    Blank,
}

/// Splits `text` at empty lines that are not inside quotes.
fn split_blank_lines(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut in_quotes = false;
    let mut chunk_start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if !in_quotes && line.trim_end_matches(['\r', '\n']).is_empty() {
            if chunk_start < offset {
                pieces.push(Piece::Text(&text[chunk_start..offset]));
            }
            pieces.push(Piece::Blank);
            chunk_start = offset + line.len();
        } else {
            let quotes = line.bytes().filter(|&b| b == b'"').count();
            if quotes % 2 == 1 {
                in_quotes = !in_quotes;
            }
        }
        offset += line.len();
    }
    if chunk_start < text.len() {
        pieces.push(Piece::Text(&text[chunk_start..]));
    }
    pieces
}

/// Splits published CSV text into rows of trimmed fields.
///
/// Quoted fields may contain commas, doubled quotes and line breaks. Rows
/// keep their own length and their position: an empty line becomes a row
/// with a single empty field. The line break ending the input adds no row,
/// and an unterminated quote swallows the rest of the input into its field
/// instead of failing.
pub fn tokenize(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for piece in split_blank_lines(text) {
        match piece {
            Piece::Blank => rows.push(vec![String::new()]),
            Piece::Text(chunk) => read_records(chunk, &mut rows),
        }
    }
    debug!("Tokenized {} rows", rows.len());
    rows
}

fn read_records(chunk: &str, rows: &mut Vec<Vec<String>>) {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(chunk.as_bytes());

    for record in reader.records() {
        match record {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(e) => {
                warn!("Skipping unreadable CSV row {}: {}", rows.len(), e);
            }
        }
    }
}

/// Returns the trimmed cell at `row`/`col`, or `""` when out of range.
pub fn cell(rows: &[Vec<String>], row: usize, col: usize) -> &str {
    rows.get(row)
        .and_then(|r| r.get(col))
        .map_or("", |s| s.as_str())
}
