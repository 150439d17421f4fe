//! Tagged query cache.
//!
//! Each stored result lives under a [`QueryKey`]; every key belongs to one
//! [`CacheTag`]. Mutations declare the tags they make stale (see
//! [`Mutation::invalidates`]) and the cache drops every key under them, so
//! the next read goes back to the backend.

use std::sync::Arc;
use std::time::Duration;

use examdesk_core::{Exam, ResourceId};
use moka::sync::Cache;
use tracing::debug;

use crate::types::ExamPage;

/// Default bound on stored queries.
const DEFAULT_MAX_ENTRIES: u64 = 256;

/// Invalidation label shared by related queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheTag {
    /// Every list query.
    ExamList,
    /// The detail query of one exam.
    Exam(ResourceId),
}

/// Key of a stored query result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// One page (`None` = unpaginated request).
    ExamPage(Option<u32>),
    /// All pages merged.
    AllExams,
    /// One exam by id.
    Exam(ResourceId),
}

impl QueryKey {
    pub fn tag(&self) -> CacheTag {
        match self {
            Self::ExamPage(_) | Self::AllExams => CacheTag::ExamList,
            Self::Exam(id) => CacheTag::Exam(id.clone()),
        }
    }
}

/// A write against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update(ResourceId),
    Delete(ResourceId),
}

impl Mutation {
    /// Tags whose queries are stale after this mutation succeeds.
    pub fn invalidates(&self) -> Vec<CacheTag> {
        match self {
            Self::Create => vec![CacheTag::ExamList],
            Self::Update(id) | Self::Delete(id) => {
                vec![CacheTag::Exam(id.clone()), CacheTag::ExamList]
            }
        }
    }
}

#[derive(Debug, Clone)]
enum CachedQuery {
    Page(Arc<ExamPage>),
    All(Arc<Vec<Exam>>),
    Exam(Arc<Exam>),
}

/// In-memory cache of list and detail queries.
#[derive(Clone)]
pub struct QueryCache {
    entries: Cache<QueryKey, CachedQuery>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl QueryCache {
    /// Cache whose entries expire `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(DEFAULT_MAX_ENTRIES)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub fn page(&self, page: Option<u32>) -> Option<Arc<ExamPage>> {
        match self.entries.get(&QueryKey::ExamPage(page)) {
            Some(CachedQuery::Page(p)) => Some(p),
            _ => None,
        }
    }

    pub fn put_page(&self, page: Option<u32>, value: ExamPage) -> Arc<ExamPage> {
        let value = Arc::new(value);
        self.entries
            .insert(QueryKey::ExamPage(page), CachedQuery::Page(value.clone()));
        value
    }

    pub fn all(&self) -> Option<Arc<Vec<Exam>>> {
        match self.entries.get(&QueryKey::AllExams) {
            Some(CachedQuery::All(all)) => Some(all),
            _ => None,
        }
    }

    pub fn put_all(&self, value: Vec<Exam>) -> Arc<Vec<Exam>> {
        let value = Arc::new(value);
        self.entries
            .insert(QueryKey::AllExams, CachedQuery::All(value.clone()));
        value
    }

    pub fn exam(&self, id: &ResourceId) -> Option<Arc<Exam>> {
        match self.entries.get(&QueryKey::Exam(id.clone())) {
            Some(CachedQuery::Exam(exam)) => Some(exam),
            _ => None,
        }
    }

    pub fn put_exam(&self, value: Exam) -> Arc<Exam> {
        let value = Arc::new(value);
        self.entries.insert(
            QueryKey::Exam(value.id.clone()),
            CachedQuery::Exam(value.clone()),
        );
        value
    }

    /// Drop every query under `tag`.
    pub fn invalidate(&self, tag: &CacheTag) {
        let stale: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|(key, _)| key.tag() == *tag)
            .map(|(key, _)| (*key).clone())
            .collect();

        debug!(tag = ?tag, entries = stale.len(), "invalidating cache tag");
        for key in stale {
            self.entries.invalidate(&key);
        }
    }

    /// Apply the invalidations declared by `mutation`.
    pub fn apply(&self, mutation: &Mutation) {
        for tag in mutation.invalidates() {
            self.invalidate(&tag);
        }
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}
