pub mod object_cache;

use crate::errors::error::VcxResult;

pub trait Storage<T>
where
    T: Clone,
{
    type Value;

    fn get(&self, id: &str) -> VcxResult<T>;
    fn insert(&self, id: &str, obj: T) -> VcxResult<String>;
    fn find_by<F>(&self, closure: F) -> VcxResult<Vec<String>>
    where
        F: FnMut((&String, &Self::Value)) -> Option<String>;
}
