//! Record lists
//!
//! The file order of the records and the two orders it must match.

/// Records in file order, sorted, and sorted without duplicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordLists {
    pub records: Vec<String>,
    pub sorted: Vec<String>,
    pub unique: Vec<String>,
}

impl RecordLists {
    pub fn from_records(records: Vec<String>) -> Self {
        // stable, byte-wise
        let mut sorted = records.clone();
        sorted.sort();

        let mut unique = sorted.clone();
        unique.dedup();

        Self {
            records,
            sorted,
            unique,
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.records == self.sorted
    }

    pub fn is_unique(&self) -> bool {
        self.sorted == self.unique
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
