//! In-memory store used by tests in place of Postgres.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex, MutexGuard,
};

use anyhow::anyhow;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::UserStore;
use crate::auth::repo_types::{NewUser, User};
use crate::db::StoreError;
use crate::ideas::model::NewIdea;
use crate::ideas::repo::IdeaStore;
use crate::ideas::repo_types::{IdeaRow, IdeaSummaryRow};

struct StoredIdea {
    id: Uuid,
    idea: NewIdea,
    created_at: OffsetDateTime,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    // insertion order
    ideas: Vec<StoredIdea>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    idea_reads: AtomicUsize,
    hide_users: AtomicBool,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend(anyhow!("memory store poisoned")))
    }

    /// Number of idea lookups/listings served so far.
    pub fn idea_reads(&self) -> usize {
        self.idea_reads.load(Ordering::SeqCst)
    }

    pub fn idea_count(&self) -> usize {
        self.inner.lock().map(|i| i.ideas.len()).unwrap_or(0)
    }

    /// Makes `find_by_email` miss, so duplicates are only caught on insert.
    pub fn hide_users_from_lookup(&self, hide: bool) {
        self.hide_users.store(hide, Ordering::SeqCst);
    }

    fn row(users: &[User], stored: &StoredIdea) -> Result<IdeaRow, StoreError> {
        let creator = users
            .iter()
            .find(|u| u.id == stored.idea.owner)
            .ok_or_else(|| StoreError::Rejected("creator does not exist".into()))?;
        Ok(IdeaRow {
            id: stored.id,
            title: stored.idea.title.clone(),
            problem: stored.idea.problem.clone(),
            proposed_solution: stored.idea.proposed_solution.clone(),
            target_audience: stored.idea.target_audience.clone(),
            tags: stored.idea.tags.clone(),
            created_by: creator.id,
            creator_name: creator.full_name.clone(),
            creator_email: creator.email.clone(),
            created_at: stored.created_at,
            updated_at: stored.created_at,
        })
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        if self.hide_users.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.lock()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate {
                field: "email".into(),
            });
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl IdeaStore for MemoryStore {
    async fn insert(&self, idea: NewIdea) -> Result<IdeaRow, StoreError> {
        let mut inner = self.lock()?;
        let stored = StoredIdea {
            id: Uuid::new_v4(),
            idea,
            created_at: OffsetDateTime::now_utc(),
        };
        let row = Self::row(&inner.users, &stored)?;
        inner.ideas.push(stored);
        Ok(row)
    }

    async fn list_summaries(&self) -> Result<Vec<IdeaSummaryRow>, StoreError> {
        self.idea_reads.fetch_add(1, Ordering::SeqCst);
        let inner = self.lock()?;
        let mut rows = inner
            .ideas
            .iter()
            .rev()
            .map(|stored| {
                Self::row(&inner.users, stored).map(|r| IdeaSummaryRow {
                    id: r.id,
                    title: r.title,
                    problem: r.problem,
                    tags: r.tags,
                    created_by: r.created_by,
                    creator_name: r.creator_name,
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        // stable: equal timestamps keep most-recent-insert first
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdeaRow>, StoreError> {
        self.idea_reads.fetch_add(1, Ordering::SeqCst);
        let inner = self.lock()?;
        inner
            .ideas
            .iter()
            .find(|stored| stored.id == id)
            .map(|stored| Self::row(&inner.users, stored))
            .transpose()
    }
}
