use std::{borrow::Cow, collections::BTreeMap};

#[derive(Debug)]
pub enum TableError {
    RowNotFound(Cow<'static, str>),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowNotFound(description) => write!(f, "row not found: {}", description),
        }
    }
}

impl From<TableError> for key_lifecycle_store::Error {
    fn from(table_error: TableError) -> Self {
        match table_error {
            TableError::RowNotFound(description) => key_lifecycle_store::Error::NotFound(description),
        }
    }
}

pub type TableResult<T> = std::result::Result<T, TableError>;

/// Trait which defines a "sigil", which should be an empty struct that represents the name of something.
pub trait SigilT: Clone + Copy + std::fmt::Debug + Default + Eq + std::hash::Hash + Ord {}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RowId<Sigil: SigilT> {
    row_id: i64,
    phantom: std::marker::PhantomData<Sigil>,
}

impl<Sigil: SigilT> RowId<Sigil> {
    pub fn increment(&mut self) {
        self.row_id += 1;
    }
}

impl<Sigil: SigilT> std::ops::Deref for RowId<Sigil> {
    type Target = i64;
    fn deref(&self) -> &Self::Target {
        &self.row_id
    }
}

impl<Sigil: SigilT> From<i64> for RowId<Sigil> {
    fn from(row_id: i64) -> Self {
        Self {
            row_id,
            phantom: Default::default(),
        }
    }
}

/// Sigil should be an empty struct that simply represents the name of the table and is used to
/// distinguish RowId-s of different tables.  Row ids start at 1 and are never reused, even after the
/// row with the greatest row id is removed (this matches SQLite's AUTOINCREMENT).
#[derive(Clone, Debug)]
pub struct Table<Sigil: SigilT, Row: Clone> {
    /// Stores the row_id to assign to the next Row to be inserted.
    next_rowid: RowId<Sigil>,
    /// Maps assigned row_id to Row, ordered by row_id.
    row_m: BTreeMap<RowId<Sigil>, Row>,
}

impl<Sigil: SigilT, Row: Clone> Table<Sigil, Row> {
    pub fn new() -> Self {
        Self {
            next_rowid: RowId::from(1),
            row_m: BTreeMap::new(),
        }
    }
    /// Returns the row_id of the inserted Row.
    pub fn insert(&mut self, row: Row) -> RowId<Sigil> {
        let row_id = self.next_rowid;
        self.next_rowid.increment();
        self.row_m.insert(row_id, row);
        row_id
    }
    /// Selects a Row based on its row_id.
    pub fn select_by_row_id(&self, row_id: RowId<Sigil>) -> Option<&Row> {
        self.row_m.get(&row_id)
    }
    /// Selects the Row having the greatest row_id.
    pub fn select_last(&self) -> Option<(RowId<Sigil>, &Row)> {
        self.row_m
            .last_key_value()
            .map(|(&row_id, row)| (row_id, row))
    }
    /// row_updater defines the update operation.
    pub fn update(
        &mut self,
        row_id: RowId<Sigil>,
        row_updater: impl FnOnce(&mut Row),
    ) -> TableResult<()> {
        let row = self
            .row_m
            .get_mut(&row_id)
            .ok_or_else(|| row_not_found(row_id))?;
        row_updater(row);
        Ok(())
    }
    pub fn remove(&mut self, row_id: RowId<Sigil>) -> TableResult<Row> {
        self.row_m
            .remove(&row_id)
            .ok_or_else(|| row_not_found(row_id))
    }
    /// Iterate over all (row_id, row) pairs in this Table in ascending row_id order.
    pub fn row_iter(&self) -> std::collections::btree_map::Iter<'_, RowId<Sigil>, Row> {
        self.row_m.iter()
    }
}

fn row_not_found<Sigil: SigilT>(row_id: RowId<Sigil>) -> TableError {
    TableError::RowNotFound(format!("{:?} row with rowid {}", Sigil::default(), *row_id).into())
}
