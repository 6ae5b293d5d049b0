pub mod local;
pub mod rest;

use anyhow::Result;

use crate::faculty::FacultyRecord;

pub use local::LocalStore;
pub use rest::RestStore;

/// The external faculty record store.
///
/// The engine only ever consumes fully materialized collections; whether they
/// come over the wire or from a JSON file on disk is irrelevant past this
/// boundary.
#[allow(async_fn_in_trait)]
pub trait FacultyStore {
    async fn list(&self) -> Result<Vec<FacultyRecord>>;
    async fn get_by_id(&self, id: &str) -> Result<Option<FacultyRecord>>;
    async fn upsert(&self, record: &FacultyRecord) -> Result<()>;
}

/// Concrete store selected by config: remote REST table or local JSON file.
pub enum AnyStore {
    Rest(RestStore),
    Local(LocalStore),
}

impl FacultyStore for AnyStore {
    async fn list(&self) -> Result<Vec<FacultyRecord>> {
        match self {
            AnyStore::Rest(store) => store.list().await,
            AnyStore::Local(store) => store.list().await,
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<FacultyRecord>> {
        match self {
            AnyStore::Rest(store) => store.get_by_id(id).await,
            AnyStore::Local(store) => store.get_by_id(id).await,
        }
    }

    async fn upsert(&self, record: &FacultyRecord) -> Result<()> {
        match self {
            AnyStore::Rest(store) => store.upsert(record).await,
            AnyStore::Local(store) => store.upsert(record).await,
        }
    }
}
