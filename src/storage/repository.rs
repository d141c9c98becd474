//! Generic JSON collection repository
//!
//! Each collection lives in its own file as a JSON array and is held in
//! memory behind an `RwLock`.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BudgetError;

use super::file_io::{read_json, write_json_atomic};

/// A record stored in a repository
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash;
    type SortKey: Ord;

    fn id(&self) -> Self::Id;

    /// Order used when listing and saving
    fn sort_key(&self) -> Self::SortKey;
}

/// Repository for one collection file
pub struct Repository<T: Record> {
    path: PathBuf,
    records: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<T::Id, T>>, BudgetError> {
        self.records
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<T::Id, T>>, BudgetError> {
        self.records
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load records from disk, replacing what is in memory
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: Vec<T> = read_json(&self.path)?;
        let mut records = self.write()?;
        records.clear();
        for record in file_data {
            records.insert(record.id(), record);
        }
        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let list = self.get_all()?;
        write_json_atomic(&self.path, &list)
    }

    pub fn get(&self, id: T::Id) -> Result<Option<T>, BudgetError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records in sort order
    pub fn get_all(&self) -> Result<Vec<T>, BudgetError> {
        let mut list: Vec<T> = self.read()?.values().cloned().collect();
        list.sort_by_key(|r| r.sort_key());
        Ok(list)
    }

    /// Records matching a predicate, in sort order
    pub fn filter<F>(&self, predicate: F) -> Result<Vec<T>, BudgetError>
    where
        F: Fn(&T) -> bool,
    {
        let mut list: Vec<T> = self
            .read()?
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        list.sort_by_key(|r| r.sort_key());
        Ok(list)
    }

    /// First record, in sort order, matching a predicate
    pub fn find<F>(&self, predicate: F) -> Result<Option<T>, BudgetError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.filter(predicate)?.into_iter().next())
    }

    pub fn upsert(&self, record: T) -> Result<(), BudgetError> {
        self.write()?.insert(record.id(), record);
        Ok(())
    }

    /// Remove a record, returning it when it existed
    pub fn delete(&self, id: T::Id) -> Result<Option<T>, BudgetError> {
        Ok(self.write()?.remove(&id))
    }

    pub fn count(&self) -> Result<usize, BudgetError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, BudgetError> {
        Ok(self.count()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Expense, NewExpense, Money, PeriodId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn expense(name: &str, day: u32) -> Expense {
        Expense::from_new(
            PeriodId::new(),
            &NewExpense::variable(CategoryId::new(), name, Money::new(1_000)),
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        )
    }

    #[test]
    fn test_upsert_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");

        let repo: Repository<Expense> = Repository::new(path.clone());
        let first = expense("Pizza", 3);
        repo.upsert(first.clone()).unwrap();
        repo.upsert(expense("Coffee", 1)).unwrap();
        repo.save().unwrap();

        let reloaded: Repository<Expense> = Repository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 2);
        assert_eq!(reloaded.get(first.id).unwrap(), Some(first));
    }

    #[test]
    fn test_delete_removes_only_target() {
        let temp_dir = TempDir::new().unwrap();
        let repo: Repository<Expense> = Repository::new(temp_dir.path().join("e.json"));
        let a = expense("A", 1);
        let b = expense("B", 2);
        repo.upsert(a.clone()).unwrap();
        repo.upsert(b.clone()).unwrap();

        assert!(repo.delete(a.id).unwrap().is_some());
        assert!(repo.delete(a.id).unwrap().is_none());
        assert_eq!(repo.get_all().unwrap(), vec![b]);
    }

    #[test]
    fn test_filter_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let repo: Repository<Expense> = Repository::new(temp_dir.path().join("e.json"));
        repo.upsert(expense("Late", 20)).unwrap();
        repo.upsert(expense("Early", 2)).unwrap();
        repo.upsert(expense("Skip", 10)).unwrap();

        let names: Vec<String> = repo
            .filter(|e| e.name != "Skip")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Early", "Late"]);
    }
}
