//! Tab-separated annotation table parser.

use crate::error::{ErrorContext, HoldoutError, ParseErrorKind, Result};
use crate::model::AnnotationTable;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Lines starting with this character are comments (GAF header style).
pub const COMMENT_PREFIX: char = '!';

/// Field separator.
pub const SEPARATOR: char = '\t';

/// Parse a table from an in-memory string.
pub fn parse_table_str(content: &str) -> Result<AnnotationTable> {
    parse_lines(content.lines().map(|line| Ok(line.to_string())))
}

/// Parse a table from any buffered reader.
pub fn parse_table_reader<R: BufRead>(reader: R) -> Result<AnnotationTable> {
    parse_lines(reader.lines().map(|line| line.map_err(HoldoutError::from)))
}

/// Parse a table from a file on disk.
pub fn parse_table_file(path: &Path) -> Result<AnnotationTable> {
    let file = File::open(path).map_err(|e| HoldoutError::io(path, e))?;
    parse_table_reader(BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))
}

/// Shared line-level parser.
///
/// Comment and blank lines are skipped; the first remaining line is the
/// header. Data lines shorter than the header are padded with empty
/// (missing) values; longer ones are rejected.
fn parse_lines<I>(lines: I) -> Result<AnnotationTable>
where
    I: Iterator<Item = Result<String>>,
{
    let mut table: Option<AnnotationTable> = None;

    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.starts_with(COMMENT_PREFIX) || line.trim().is_empty() {
            continue;
        }

        let fields: Vec<String> = line.split(SEPARATOR).map(str::to_string).collect();
        match table.as_mut() {
            None => {
                table = Some(
                    AnnotationTable::new(fields)
                        .with_context(|| format!("header on line {}", idx + 1))?,
                );
            }
            Some(table) => {
                let expected = table.column_count();
                if fields.len() > expected {
                    return Err(HoldoutError::parse(
                        "data row",
                        ParseErrorKind::RaggedRow {
                            line: idx + 1,
                            expected,
                            found: fields.len(),
                        },
                    ));
                }
                let mut fields = fields;
                fields.resize(expected, String::new());
                table.push_row(fields)?;
            }
        }
    }

    table.ok_or_else(|| HoldoutError::parse("empty input", ParseErrorKind::MissingHeader))
}
