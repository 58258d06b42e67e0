use std::collections::BTreeSet;

use crate::error::{LayoutError, LayoutResult};

/// One input row. Values are positional against the owning [`Table`]'s header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A header plus records that all share its field count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            records: Vec::new(),
        }
    }

    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<String>>) -> LayoutResult<Self> {
        let mut table = Self::new(header);
        for row in rows {
            table.push(Record::new(row))?;
        }
        Ok(table)
    }

    pub fn push(&mut self, record: Record) -> LayoutResult<()> {
        if record.len() != self.header.len() {
            return Err(LayoutError::malformed(format!(
                "record {} has {} fields, header has {}",
                self.records.len() + 1,
                record.len(),
                self.header.len()
            )));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get<'a>(&'a self, record: &'a Record, field: &str) -> Option<&'a str> {
        let idx = self.header.iter().position(|h| h == field)?;
        record.values.get(idx).map(String::as_str)
    }

    pub(crate) fn duplicate_field(&self) -> Option<&str> {
        let mut seen = BTreeSet::new();
        self.header
            .iter()
            .find(|h| !seen.insert(h.as_str()))
            .map(String::as_str)
    }
}
