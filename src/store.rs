use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use crate::errors::SpesaError;
use crate::expenses::Expense;

const TMP_SUFFIX: &str = "tmp";

/// Owning, write-through store for the expense collection. Every mutation
/// rewrites the whole backing file; reads that fail (missing file, malformed
/// content) degrade to an empty collection instead of surfacing an error.
#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let expenses = load_expenses(&path);
        Self { path, expenses }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn get(&self, id: &Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == *id)
    }

    pub fn add(&mut self, expense: Expense) -> Result<(), SpesaError> {
        self.expenses.push(expense);
        self.save()
    }

    /// Replaces the record with the given id. Returns false (without
    /// touching the file) when no such record exists.
    pub fn update(&mut self, id: &Uuid, expense: Expense) -> Result<bool, SpesaError> {
        match self.expenses.iter_mut().find(|existing| existing.id == *id) {
            Some(slot) => {
                *slot = expense;
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<bool, SpesaError> {
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != *id);
        if self.expenses.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Removes the record at `index` and saves. Out of bounds is a silent
    /// no-op.
    pub fn delete_at(&mut self, index: usize) -> Result<(), SpesaError> {
        if index >= self.expenses.len() {
            return Ok(());
        }
        self.expenses.remove(index);
        self.save()
    }

    pub fn clear(&mut self) -> Result<(), SpesaError> {
        self.expenses.clear();
        self.save()
    }

    /// Serializes the whole collection and replaces the backing file via a
    /// tmp-file rename, so a failed write never leaves a truncated file.
    pub fn save(&self) -> Result<(), SpesaError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.expenses)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn load_expenses(path: &Path) -> Vec<Expense> {
    if !path.exists() {
        return Vec::new();
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %path.display(), %err, "could not read expense file, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(expenses) => expenses,
        Err(err) => {
            warn!(path = %path.display(), %err, "expense file is malformed, starting empty");
            Vec::new()
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), SpesaError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
