//! CSV loading
//!
//! Reads the webtoon table and normalizes each row into an [`Item`] once,
//! so nothing downstream touches loosely typed columns. Rows without a
//! numeric id are skipped with a warning; only a structurally broken
//! table fails the load.

use crate::{Item, RawRecord, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load all rows of a CSV file with a header line
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let path = path.as_ref();
    info!("Loading items from {:?}", path);
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    read_items(reader)
}

/// Load rows from any reader, e.g. an in-memory table
pub fn load_csv_reader<R: Read>(rdr: R) -> Result<Vec<Item>> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(rdr);
    read_items(reader)
}

fn read_items<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    let mut missing_counters = 0usize;
    let mut skipped_rows = 0usize;

    for record in reader.deserialize::<RawRecord>() {
        let raw = record?;
        let had_likes = raw.likes.is_some();
        let had_subs = raw.subscribers.is_some();
        let item = match Item::try_from(raw) {
            Ok(item) => item,
            Err(e) => {
                warn!("Skipping row: {}", e);
                skipped_rows += 1;
                continue;
            }
        };
        if (had_likes && item.likes.is_none()) || (had_subs && item.subscribers.is_none()) {
            missing_counters += 1;
        }
        items.push(item);
    }

    if missing_counters > 0 {
        debug!("{} rows with unreadable popularity counters", missing_counters);
    }
    if skipped_rows > 0 {
        warn!("Skipped {} rows without a numeric id", skipped_rows);
    }
    info!("Loaded {} items", items.len());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Status, UNKNOWN_WRITER};
    use std::io::Write;

    const TABLE: &str = "\
id,Name,Writer,Likes,Genre,Rating,Subscribers,Summary,Update,Reading Link
1,Tower of God,SIU,42.1M,Fantasy,9.84,4.9M,\"What do you desire?\",UP EVERY SUNDAY,https://example.com/1
2,Lore Olympus,,29.9M,Romance,9.58,N/A,Witness what the gods do.,COMPLETED,
";

    #[test]
    fn test_load_from_reader() {
        let items = load_csv_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "Tower of God");
        assert_eq!(items[0].likes, Some(42_100_000.0));
        assert_eq!(items[0].status, Status::Ongoing);

        assert_eq!(items[1].writer, UNKNOWN_WRITER);
        assert_eq!(items[1].subscribers, None);
        assert_eq!(items[1].status, Status::Completed);
        assert!(items[1].reading_link.is_none());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();
        let items = load_csv(file.path()).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_rows_without_numeric_id_are_skipped() {
        let table = "\
id,Name,Writer,Likes,Genre,Rating,Subscribers,Summary,Update,Reading Link
1,Alpha,W1,1K,Action,9.5,2K,first,COMPLETED,
,Blank Id,W2,1K,Action,9.0,2K,second,COMPLETED,
x7,Letter Id,W3,1K,Drama,8.0,2K,third,COMPLETED,
4,Delta,W4,1K,Drama,7.5,2K,fourth,COMPLETED,
";
        let items = load_csv_reader(table.as_bytes()).unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Delta"]);
        assert_eq!(items[1].id.0, 4);
        assert_eq!(items[0].rating, Some(9.5));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_csv("/definitely/not/here.csv").is_err());
    }
}
