//! In-memory persistence gateway.
//!
//! Backs every repository port with a `RwLock`-guarded vector. Locks are
//! taken synchronously and released before any await point, so no lock
//! is ever held across an I/O suspension. Identifier assignment and the
//! uniqueness checks both live here: the gateway is the authority.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use pagination::Page;

use crate::domain::catalog::{Category, CategoryId, Component, ComponentId};
use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, ComponentQuery, ComponentRepository,
    ComponentRepositoryError, NewCategory, NewComponentRecord, UserRepository, UserRepositoryError,
};
use crate::domain::user::{Email, Identity, NewUser, UserId, UserRecord};

fn poisoned_message<T>(_: PoisonError<T>) -> String {
    "gateway state lock poisoned".to_owned()
}

/// In-memory [`UserRepository`] adapter.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<Identity, UserRepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|err| UserRepositoryError::Connection {
                message: poisoned_message(err),
            })?;
        // Case-sensitive comparison: the email is stored exactly as supplied.
        if rows.iter().any(|row| row.email == user.email) {
            return Err(UserRepositoryError::DuplicateEmail);
        }
        let record = UserRecord {
            id: UserId::random(),
            name: user.name,
            email: user.email,
            role: user.role,
            password_hash: Some(user.password_hash),
        };
        let identity = record.identity();
        rows.push(record);
        Ok(identity)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Identity>, UserRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|err| UserRepositoryError::Connection {
                message: poisoned_message(err),
            })?;
        Ok(rows
            .iter()
            .find(|row| row.id == *id)
            .map(UserRecord::identity))
    }

    async fn find_by_email(
        &self,
        email: &Email,
        include_password: bool,
    ) -> Result<Option<UserRecord>, UserRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|err| UserRepositoryError::Connection {
                message: poisoned_message(err),
            })?;
        Ok(rows.iter().find(|row| row.email == *email).map(|row| {
            let mut record = row.clone();
            if !include_password {
                record.password_hash = None;
            }
            record
        }))
    }
}

/// In-memory [`CategoryRepository`] adapter.
#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    rows: RwLock<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: NewCategory) -> Result<Category, CategoryRepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|err| CategoryRepositoryError::Connection {
                message: poisoned_message(err),
            })?;
        // Names arrive normalised, so equality is the whole duplicate check.
        if rows.iter().any(|row| row.name() == &category.name) {
            return Err(CategoryRepositoryError::DuplicateName);
        }
        let created = Category::new(CategoryId::random(), category.name);
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_ids(
        &self,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, CategoryRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|err| CategoryRepositoryError::Connection {
                message: poisoned_message(err),
            })?;
        Ok(rows
            .iter()
            .filter(|row| ids.contains(&row.id()))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|err| CategoryRepositoryError::Connection {
                message: poisoned_message(err),
            })?;
        let mut all: Vec<Category> = rows.clone();
        all.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(all)
    }
}

/// In-memory [`ComponentRepository`] adapter.
#[derive(Debug, Default)]
pub struct InMemoryComponentRepository {
    rows: RwLock<Vec<Component>>,
}

impl InMemoryComponentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComponentRepository for InMemoryComponentRepository {
    async fn create(
        &self,
        component: NewComponentRecord,
    ) -> Result<Component, ComponentRepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|err| ComponentRepositoryError::Connection {
                message: poisoned_message(err),
            })?;
        let created = Component::new(
            ComponentId::random(),
            component.title,
            component.description,
            component.price,
            component.url_thumbnail,
            component.categories,
        );
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_page(
        &self,
        query: ComponentQuery,
    ) -> Result<Page<Component>, ComponentRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|err| ComponentRepositoryError::Connection {
                message: poisoned_message(err),
            })?;
        let mut matching: Vec<Component> = rows
            .iter()
            .filter(|component| {
                query
                    .title
                    .as_ref()
                    .is_none_or(|filter| filter.matches(component.title()))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.title().as_str().cmp(b.title().as_str()));

        let total = matching.len() as u64;
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
        let data: Vec<Component> = matching.into_iter().skip(offset).take(limit).collect();
        Ok(Page::new(data, query.page, total))
    }
}
