use crate::error::{Result, SvdError};
use crate::models::{HoldoutRecord, ItemId, Prediction, Rating, TestRecord, UserId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::{Read, Write};
use std::marker::PhantomData;

pub const SPACE_DELIMITER: u8 = b' ';
pub const COMMA_DELIMITER: u8 = b',';

pub trait TableRow: Sized {
    const FIELDS: usize;
    type Row: DeserializeOwned;

    fn from_row(row: Self::Row) -> Self;
}

#[derive(Debug, Deserialize)]
pub struct LearnRow(u64, UserId, ItemId, i32);

#[derive(Debug, Deserialize)]
pub struct HoldoutRow(u64, UserId, ItemId, f32);

#[derive(Debug, Deserialize)]
pub struct TestIdRow(u64, UserId, ItemId);

impl TableRow for Rating {
    const FIELDS: usize = 4;
    type Row = LearnRow;

    fn from_row(LearnRow(_, user_id, item_id, rating): LearnRow) -> Self {
        Rating::new(user_id, item_id, rating)
    }
}

impl TableRow for HoldoutRecord {
    const FIELDS: usize = 4;
    type Row = HoldoutRow;

    fn from_row(HoldoutRow(_, user_id, item_id, rating): HoldoutRow) -> Self {
        HoldoutRecord::new(user_id, item_id, rating)
    }
}

impl TableRow for TestRecord {
    const FIELDS: usize = 3;
    type Row = TestIdRow;

    fn from_row(TestIdRow(id, user_id, item_id): TestIdRow) -> Self {
        TestRecord::new(id, user_id, item_id)
    }
}

pub struct TableReader<R, T> {
    records: csv::StringRecordsIntoIter<R>,
    _row: PhantomData<T>,
}

impl<R: Read, T: TableRow> TableReader<R, T> {
    pub fn new(reader: R, delimiter: u8) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader)
            .into_records();

        Self {
            records,
            _row: PhantomData,
        }
    }

    fn parse_record(record: csv::StringRecord) -> Result<T> {
        if record.len() != T::FIELDS {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            return Err(SvdError::format(format!(
                "line {}: expected {} fields, found {}",
                line,
                T::FIELDS,
                record.len()
            )));
        }

        let row: T::Row = record.deserialize(None)?;
        Ok(T::from_row(row))
    }
}

impl<R: Read, T: TableRow> Iterator for TableReader<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        Some(Self::parse_record(record))
    }
}

pub struct SubmissionWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> SubmissionWriter<W> {
    pub fn new(writer: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        writer.write_record(["Id", "Prediction"])?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write(&mut self, prediction: &Prediction) -> Result<()> {
        self.writer.write_record([
            prediction.id.to_string(),
            format!("{:.6}", prediction.rating),
        ])?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| SvdError::Io(e.into_error()))
    }
}
