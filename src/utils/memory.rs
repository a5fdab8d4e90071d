use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use chrono::Utc;
use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::utils::date::format_date_time;

lazy_static! {
    static ref SHARED_TABLES: Mutex<HashMap<String, MemoryTable>> = Mutex::new(HashMap::new());
}

// MemoryTable is a process-local table keyed by id. It evaluates predicates,
// ordering and pagination itself so callers never filter loaded rows.
#[derive(Debug, Clone)]
pub(crate) struct MemoryTable {
    key_name: String,
    rows: Arc<RwLock<BTreeMap<String, Value>>>,
}

impl MemoryTable {
    pub(crate) fn new(key_name: &str) -> Self {
        Self {
            key_name: key_name.to_string(),
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    // the same rows for every caller asking for `table_name` in this process
    pub(crate) fn shared(table_name: &str, key_name: &str) -> Self {
        let mut tables = SHARED_TABLES.lock().unwrap_or_else(PoisonError::into_inner);
        tables.entry(table_name.to_string())
            .or_insert_with(|| MemoryTable::new(key_name))
            .clone()
    }

    pub(crate) fn put_new<T: Serialize + Identifiable>(&self, entity: &T) -> LibraryResult<usize> {
        let val = serde_json::to_value(entity)?;
        let mut rows = self.write()?;
        if rows.contains_key(&entity.id()) {
            return Err(LibraryError::duplicate_key(
                format!("{} {} already exists", self.key_name, entity.id()).as_str()));
        }
        rows.insert(entity.id(), val);
        Ok(1)
    }

    pub(crate) fn put_versioned<T: Serialize + Identifiable>(&self, entity: &T) -> LibraryResult<usize> {
        let mut val = serde_json::to_value(entity)?;
        let mut rows = self.write()?;
        let stored_version = match rows.get(&entity.id()) {
            Some(existing) => existing.get("version").and_then(Value::as_i64).unwrap_or_default(),
            None => {
                return Err(LibraryError::not_found(
                    format!("{} {} not found", self.key_name, entity.id()).as_str()));
            }
        };
        if stored_version != entity.version() {
            return Err(LibraryError::database(
                format!("stale version {} for {} {}", entity.version(), self.key_name, entity.id()).as_str(),
                Some("409".to_string()), false));
        }
        if let Value::Object(map) = &mut val {
            map.insert("version".to_string(), Value::from(entity.version() + 1));
            map.insert("updated_at".to_string(), Value::String(format_date_time(&Utc::now().naive_utc())));
        }
        rows.insert(entity.id(), val);
        Ok(1)
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, id: &str) -> LibraryResult<T> {
        let rows = self.read()?;
        match rows.get(id) {
            Some(val) => Ok(serde_json::from_value(val.clone())?),
            None => Err(LibraryError::not_found(
                format!("{} {} not found", self.key_name, id).as_str())),
        }
    }

    pub(crate) fn delete(&self, id: &str) -> LibraryResult<usize> {
        let mut rows = self.write()?;
        match rows.remove(id) {
            Some(_) => Ok(1),
            None => Err(LibraryError::not_found(
                format!("{} {} not found", self.key_name, id).as_str())),
        }
    }

    pub(crate) fn query<T: DeserializeOwned>(&self, predicate: &HashMap<String, String>, order_by: &[&str],
                                             page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<T>> {
        let offset = parse_offset(page)?;
        let rows = self.read()?;
        let mut matched: Vec<&Value> = rows.values().filter(|row| matches(row, predicate)).collect();
        matched.sort_by(|a, b| compare_rows(a, b, order_by, self.key_name.as_str()));
        let size = page_size.max(1);
        let next_page = if offset + size < matched.len() {
            Some((offset + size).to_string())
        } else {
            None
        };
        let records = matched.into_iter()
            .skip(offset)
            .take(size)
            .map(|row| serde_json::from_value(row.clone()))
            .collect::<Result<Vec<T>, _>>()?;
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }

    pub(crate) fn count(&self, predicate: &HashMap<String, String>) -> LibraryResult<usize> {
        let rows = self.read()?;
        Ok(rows.values().filter(|row| matches(row, predicate)).count())
    }

    fn read(&self) -> LibraryResult<RwLockReadGuard<'_, BTreeMap<String, Value>>> {
        self.rows.read().map_err(|err| {
            LibraryError::runtime(format!("memory table poisoned {}", err).as_str(), None)
        })
    }

    fn write(&self) -> LibraryResult<RwLockWriteGuard<'_, BTreeMap<String, Value>>> {
        self.rows.write().map_err(|err| {
            LibraryError::runtime(format!("memory table poisoned {}", err).as_str(), None)
        })
    }
}

fn parse_offset(page: Option<&str>) -> LibraryResult<usize> {
    match page {
        Some(token) => token.parse::<usize>().map_err(|_| {
            LibraryError::validation(format!("invalid page token {}", token).as_str(), Some("400".to_string()))
        }),
        None => Ok(0),
    }
}

// string form used for comparisons; absent and null sort before everything
fn field_text(row: &Value, field: &str) -> String {
    match row.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn matches(row: &Value, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(k, expected)| {
        let (field, op) = split_predicate_key(k);
        let actual = field_text(row, field);
        match op {
            "<" => actual.as_str() < expected.as_str(),
            "<=" => actual.as_str() <= expected.as_str(),
            ">" => actual.as_str() > expected.as_str(),
            ">=" => actual.as_str() >= expected.as_str(),
            "<>" => actual != *expected,
            _ => actual == *expected,
        }
    })
}

// rows of one library branch only
pub(crate) fn with_branch(predicate: &HashMap<String, String>, branch_id: &str) -> HashMap<String, String> {
    let mut scoped = predicate.clone();
    scoped.insert("branch_id".to_string(), branch_id.to_string());
    scoped
}

pub(crate) fn split_predicate_key(k: &str) -> (&str, &str) {
    match k.split_once(':') {
        Some((field, op)) => (field, op),
        None => (k, "="),
    }
}

fn compare_rows(a: &Value, b: &Value, order_by: &[&str], key_name: &str) -> Ordering {
    for field in order_by {
        let ord = field_text(a, field).cmp(&field_text(b, field));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    field_text(a, key_name).cmp(&field_text(b, key_name))
}
