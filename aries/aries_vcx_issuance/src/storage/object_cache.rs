use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, PoisonError, RwLock},
};

use super::Storage;
use crate::errors::error::prelude::*;

/// Process-local storage keyed by record id. Each entry sits behind its own mutex, so readers of
/// different records never contend beyond the map lock.
pub struct ObjectCache<T>
where
    T: Clone,
{
    cache_name: String,
    store: RwLock<HashMap<String, Mutex<T>>>,
}

impl<T> ObjectCache<T>
where
    T: Clone,
{
    pub fn new(cache_name: &str) -> Self {
        Self {
            cache_name: cache_name.to_owned(),
            store: Default::default(),
        }
    }

    fn lock_error<G>(&self, err: PoisonError<G>) -> AriesVcxError {
        error!("[ObjectCache: {}] Lock poisoned: {err}", self.cache_name);
        AriesVcxError::from_msg(
            AriesVcxErrorKind::LockError,
            format!("[ObjectCache: {}] Unable to lock object store: {err}", self.cache_name),
        )
    }
}

impl<T> fmt::Debug for ObjectCache<T>
where
    T: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCache")
            .field("cache_name", &self.cache_name)
            .finish_non_exhaustive()
    }
}

impl<T> Storage<T> for ObjectCache<T>
where
    T: Clone,
{
    type Value = Mutex<T>;

    fn get(&self, id: &str) -> VcxResult<T> {
        let store = self.store.read().map_err(|err| self.lock_error(err))?;
        let entry = store.get(id).ok_or_else(|| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::NotFound,
                format!("[ObjectCache: {}] Object not found for id: {id}", self.cache_name),
            )
        })?;
        let obj = entry.lock().map_err(|err| self.lock_error(err))?;
        Ok(obj.clone())
    }

    fn insert(&self, id: &str, obj: T) -> VcxResult<String> {
        let mut store = self.store.write().map_err(|err| self.lock_error(err))?;
        store.insert(id.to_owned(), Mutex::new(obj));
        Ok(id.to_owned())
    }

    fn find_by<F>(&self, closure: F) -> VcxResult<Vec<String>>
    where
        F: FnMut((&String, &Self::Value)) -> Option<String>,
    {
        let store = self.store.read().map_err(|err| self.lock_error(err))?;
        Ok(store.iter().filter_map(closure).collect())
    }
}
