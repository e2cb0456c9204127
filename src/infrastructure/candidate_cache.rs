use crate::domain::models::{CandidateList, RangeConfig};
use crate::infrastructure::error::InfraError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub trait CandidateCacheRepository: Send + Sync {
    fn get(&self, config: &RangeConfig) -> Result<Option<Arc<CandidateList>>, InfraError>;
    fn insert(&self, config: &RangeConfig, list: Arc<CandidateList>) -> Result<(), InfraError>;
    fn entry_count(&self) -> Result<usize, InfraError>;
}

/// Candidate lists keyed by [`RangeConfig::cache_key`].
#[derive(Debug, Default)]
pub struct InMemoryCandidateCache {
    lists: Mutex<HashMap<String, Arc<CandidateList>>>,
}

impl CandidateCacheRepository for InMemoryCandidateCache {
    fn get(&self, config: &RangeConfig) -> Result<Option<Arc<CandidateList>>, InfraError> {
        let lists = self
            .lists
            .lock()
            .map_err(|error| InfraError::Cache(format!("candidate cache lock poisoned: {error}")))?;
        Ok(lists.get(&config.cache_key()).cloned())
    }

    fn insert(&self, config: &RangeConfig, list: Arc<CandidateList>) -> Result<(), InfraError> {
        let mut lists = self
            .lists
            .lock()
            .map_err(|error| InfraError::Cache(format!("candidate cache lock poisoned: {error}")))?;
        lists.insert(config.cache_key(), list);
        Ok(())
    }

    fn entry_count(&self) -> Result<usize, InfraError> {
        let lists = self
            .lists
            .lock()
            .map_err(|error| InfraError::Cache(format!("candidate cache lock poisoned: {error}")))?;
        Ok(lists.len())
    }
}
