//! Delimited text output
//!
//! One row per keyword, written with the `csv` crate. Multi-valued cells are
//! joined with `;`; a `;` or `\` inside a list item (a document named
//! `a;b.txt`, a sentence with a semicolon) is escaped with a backslash so
//! every cell splits back into exactly its items.

use std::io::{self, Write};

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::TableWriter;
use crate::types::{KeywordRecord, KeywordTable};

const LIST_SEPARATOR: &str = ";";

/// Writes the keyword table as CSV (or TSV with a tab delimiter).
#[derive(Debug, Clone)]
pub struct CsvWriter {
    delimiter: char,
    include_sentences: bool,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_sentences: false,
        }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field delimiter; must be a single ASCII character.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Add a `sentences` column.
    pub fn with_sentences(mut self, include_sentences: bool) -> Self {
        self.include_sentences = include_sentences;
        self
    }

    fn header(&self) -> Vec<&'static str> {
        let mut columns = vec!["rank", "keyword", "frequency", "documents", "locations"];
        if self.include_sentences {
            columns.push("sentences");
        }
        columns
    }

    fn row(&self, record: &KeywordRecord) -> Vec<String> {
        let mut fields = vec![
            record.rank.to_string(),
            record.keyword.clone(),
            record.frequency.to_string(),
            join_list(&record.documents),
            join_list(&record.locations),
        ];
        if self.include_sentences {
            fields.push(join_list(&record.sentences));
        }
        fields
    }

    fn delimiter_byte(&self) -> io::Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("delimiter {:?} is not an ASCII character", self.delimiter),
                )
            })
    }
}

impl TableWriter for CsvWriter {
    fn write_table(&self, table: &KeywordTable, out: &mut dyn Write) -> io::Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter_byte()?)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(out);

        writer.write_record(self.header())?;
        for record in &table.keywords {
            writer.write_record(self.row(record))?;
        }
        writer.flush()
    }
}

/// Join list items with `;`, escaping `\` and `;` inside each item.
fn join_list<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| escape_item(&item.to_string()))
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

fn escape_item(item: &str) -> String {
    if !item.contains(['\\', ';']) {
        return item.to_string();
    }
    let mut escaped = String::with_capacity(item.len() + 2);
    for c in item.chars() {
        if c == '\\' || c == ';' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;

    fn record(rank: usize, keyword: &str, frequency: usize, locations: &[(&str, usize)]) -> KeywordRecord {
        let mut documents: Vec<String> = Vec::new();
        for (doc, _) in locations {
            if documents.last().map(String::as_str) != Some(*doc) {
                documents.push(doc.to_string());
            }
        }
        KeywordRecord {
            rank,
            keyword: keyword.to_string(),
            frequency,
            documents,
            locations: locations.iter().map(|(d, s)| Location::new(*d, *s)).collect(),
            sentences: Vec::new(),
        }
    }

    fn render(writer: &CsvWriter, table: &KeywordTable) -> String {
        let mut buf = Vec::new();
        writer.write_table(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_table_is_header_only() {
        let out = render(&CsvWriter::new(), &KeywordTable::default());
        assert_eq!(out, "rank,keyword,frequency,documents,locations\n");
    }

    #[test]
    fn test_rows() {
        let table = KeywordTable {
            keywords: vec![
                record(1, "mice", 2, &[("a.txt", 0), ("a.txt", 1)]),
                record(2, "cats", 1, &[("a.txt", 0)]),
            ],
            ..Default::default()
        };

        let out = render(&CsvWriter::new(), &table);
        assert_eq!(
            out,
            "rank,keyword,frequency,documents,locations\n\
             1,mice,2,a.txt,a.txt:0;a.txt:1\n\
             2,cats,1,a.txt,a.txt:0\n"
        );
    }

    #[test]
    fn test_tab_delimiter() {
        let table = KeywordTable {
            keywords: vec![record(1, "mice", 1, &[("a.txt", 0)])],
            ..Default::default()
        };
        let out = render(&CsvWriter::new().with_delimiter('\t'), &table);
        assert_eq!(
            out,
            "rank\tkeyword\tfrequency\tdocuments\tlocations\n1\tmice\t1\ta.txt\ta.txt:0\n"
        );
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let mut rec = record(1, "mice", 1, &[("a, b.txt", 0)]);
        rec.sentences = vec!["He said \"mice\".".to_string()];
        let table = KeywordTable {
            keywords: vec![rec],
            ..Default::default()
        };

        let out = render(&CsvWriter::new().with_sentences(true), &table);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "rank,keyword,frequency,documents,locations,sentences");
        assert_eq!(
            lines[1],
            "1,mice,1,\"a, b.txt\",\"a, b.txt:0\",\"He said \"\"mice\"\".\""
        );
    }

    /// Split a list cell on unescaped `;` and undo the escaping.
    fn split_list(cell: &str) -> Vec<String> {
        let mut items = vec![String::new()];
        let mut chars = cell.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => items.last_mut().unwrap().extend(chars.next()),
                ';' => items.push(String::new()),
                _ => items.last_mut().unwrap().push(c),
            }
        }
        items
    }

    #[test]
    fn test_separator_in_document_name_is_escaped() {
        let mut rec = record(1, "rust", 2, &[("a;b.txt", 0), ("c\\d.txt", 3)]);
        rec.sentences = vec!["Rust; fast.".to_string(), "Rust.".to_string()];
        let table = KeywordTable {
            keywords: vec![rec],
            ..Default::default()
        };

        let out = render(&CsvWriter::new().with_sentences(true), &table);
        let row: Vec<&str> = out.lines().nth(1).unwrap().split(',').collect();

        assert_eq!(row[3], "a\\;b.txt;c\\\\d.txt");
        assert_eq!(split_list(row[3]), vec!["a;b.txt", "c\\d.txt"]);
        assert_eq!(split_list(row[4]), vec!["a;b.txt:0", "c\\d.txt:3"]);
        assert_eq!(split_list(row[5]), vec!["Rust; fast.", "Rust."]);
    }

    #[test]
    fn test_non_ascii_delimiter_is_an_error() {
        let mut buf = Vec::new();
        let err = CsvWriter::new()
            .with_delimiter('é')
            .write_table(&KeywordTable::default(), &mut buf)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(buf.is_empty());
    }
}
