use crate::error::{Result, SvdError};
use crate::models::Rating;
use crate::store::RatingStore;
use std::io::{Read, Write};

const WORD: usize = std::mem::size_of::<i32>();
const RECORD_BYTES: usize = 3 * WORD;

fn read_word(bytes: &[u8]) -> i32 {
    i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn dump_id(value: u32, name: &str, index: usize) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| SvdError::format(format!("record {}: {} {} does not fit an i32", index, name, value)))
}

fn non_negative_id(value: i32, name: &str, index: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| SvdError::format(format!("record {}: negative {} {}", index, name, value)))
}

/// Bytes past the last counted record are ignored.
pub fn read_ratings<R: Read>(mut reader: R, capacity: usize) -> Result<RatingStore> {
    let mut header = [0u8; WORD];
    reader
        .read_exact(&mut header)
        .map_err(|_| SvdError::format("rating dump is missing its row count"))?;

    let count = read_word(&header);
    let count = usize::try_from(count)
        .map_err(|_| SvdError::format(format!("negative row count {} in rating dump", count)))?;
    if count > capacity {
        return Err(SvdError::CapacityExceeded { capacity });
    }

    let mut body = vec![0u8; count * RECORD_BYTES];
    reader.read_exact(&mut body).map_err(|_| {
        SvdError::format(format!(
            "rating dump declares {} rows but holds fewer than {} bytes of records",
            count,
            body.len()
        ))
    })?;

    let rows = body
        .chunks_exact(RECORD_BYTES)
        .enumerate()
        .map(|(index, record)| -> Result<Rating> {
            Ok(Rating::new(
                non_negative_id(read_word(&record[0..WORD]), "user id", index)?,
                non_negative_id(read_word(&record[WORD..2 * WORD]), "item id", index)?,
                read_word(&record[2 * WORD..]),
            ))
        });

    RatingStore::load(capacity, rows)
}

pub fn write_ratings<W: Write>(store: &RatingStore, mut writer: W) -> Result<()> {
    let count = i32::try_from(store.count()).map_err(|_| {
        SvdError::format(format!("{} rows do not fit an i32 row count", store.count()))
    })?;
    writer.write_all(&count.to_le_bytes())?;

    for (index, rating) in store.iter().enumerate() {
        writer.write_all(&dump_id(rating.user_id, "user id", index)?.to_le_bytes())?;
        writer.write_all(&dump_id(rating.item_id, "item id", index)?.to_le_bytes())?;
        writer.write_all(&rating.rating.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> RatingStore {
        RatingStore::load(
            8,
            [(0, 1, 5), (2, 3, 1), (4, 0, 3)]
                .into_iter()
                .map(|(u, i, r)| Ok(Rating::new(u, i, r))),
        )
        .unwrap()
    }

    #[test]
    fn test_dump_layout() {
        let mut bytes = Vec::new();
        write_ratings(&sample_store(), &mut bytes).unwrap();
        assert_eq!(bytes.len(), WORD + 3 * RECORD_BYTES);
        assert_eq!(&bytes[..WORD], &3i32.to_le_bytes());
        assert_eq!(&bytes[WORD + RECORD_BYTES..WORD + RECORD_BYTES + WORD], &2i32.to_le_bytes());
    }

    #[test]
    fn test_padded_dump_reads_counted_rows() {
        let mut bytes = Vec::new();
        write_ratings(&sample_store(), &mut bytes).unwrap();
        bytes.extend(vec![0xAB; 5 * RECORD_BYTES]);

        let store = read_ratings(bytes.as_slice(), 8).unwrap();
        assert_eq!(store.count(), 3);
        assert_eq!(store.get(2), Rating::new(4, 0, 3));
    }

    #[test]
    fn test_count_over_capacity() {
        let mut bytes = Vec::new();
        write_ratings(&sample_store(), &mut bytes).unwrap();
        assert!(matches!(
            read_ratings(bytes.as_slice(), 2),
            Err(SvdError::CapacityExceeded { capacity: 2 })
        ));
    }

    #[test]
    fn test_id_beyond_i32_rejected() {
        let rows = [Ok(Rating::new(0, 1, 4)), Ok(Rating::new(u32::MAX, 1, 4))];
        let store = RatingStore::load(2, rows).unwrap();
        let mut bytes = Vec::new();
        match write_ratings(&store, &mut bytes) {
            Err(SvdError::Format { reason }) => assert!(reason.contains("record 1"), "{}", reason),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_truncated_dump() {
        let mut bytes = Vec::new();
        write_ratings(&sample_store(), &mut bytes).unwrap();
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            read_ratings(bytes.as_slice(), 8),
            Err(SvdError::Format { .. })
        ));
    }
}
