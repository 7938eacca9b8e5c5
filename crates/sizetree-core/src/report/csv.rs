/// CSV export of the flat size table, one `path,size,depth` row per
/// tracked directory in walk order.
use crate::model::SizeTable;
use serde::Serialize;
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct Row<'a> {
    path: Cow<'a, str>,
    size: u64,
    depth: usize,
}

pub fn write_csv<W: Write>(table: &SizeTable, out: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for entry in table {
        writer.serialize(Row {
            path: entry.path.to_string_lossy(),
            size: entry.total_size,
            depth: entry.depth,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the table to a new file at `path`, replacing any existing one.
pub fn export_csv(table: &SizeTable, path: &Path) -> csv::Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table() -> SizeTable {
        let mut table = SizeTable::new();
        table.insert(Path::new("/data"), 30, 0);
        table.insert(Path::new("/data/sub, with comma"), 20, 1);
        table
    }

    #[test]
    fn header_and_rows_in_walk_order() {
        let mut out = Vec::new();
        write_csv(&table(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "path,size,depth\n/data,30,0\n\"/data/sub, with comma\",20,1\n"
        );
    }

    #[test]
    fn export_writes_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sizes.csv");
        export_csv(&table(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("path,size,depth\n"));
        assert_eq!(text.lines().count(), 3);
    }
}
