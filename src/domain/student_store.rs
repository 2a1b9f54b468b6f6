//! Concurrent student storage with optional snapshot persistence.
//!
//! [`StudentStore`] keeps every record in a single `HashMap` behind one
//! [`tokio::sync::Mutex`]. Every operation, reads included, holds the
//! lock for its full duration, so each call observes a fully applied
//! prior state and no two mutations interleave.
//!
//! When a [`SnapshotFile`] is attached, each mutation rewrites the
//! snapshot before the lock is released. A failed write rolls the
//! in-memory change back and surfaces [`GatewayError::PersistenceError`].
//!
//! Mutations run on their own task. Dropping the future returned by
//! [`StudentStore::create`], [`StudentStore::update`] or
//! [`StudentStore::delete`] (a client disconnect, a request timeout)
//! does not interrupt the write or its rollback.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{Student, StudentId, StudentProfile};
use crate::error::GatewayError;
use crate::persistence::SnapshotFile;

/// Lock-protected store contents.
#[derive(Debug)]
struct StoreState {
    students: HashMap<StudentId, Student>,
    /// Next identifier to assign. Always greater than every ID ever
    /// stored; `None` once the ID range is exhausted.
    next_id: Option<StudentId>,
}

impl StoreState {
    fn new() -> Self {
        Self {
            students: HashMap::new(),
            next_id: Some(StudentId::FIRST),
        }
    }

    fn records(&self) -> Vec<Student> {
        let mut records: Vec<Student> = self.students.values().cloned().collect();
        records.sort_by_key(|s| s.id);
        records
    }

    fn observe(&mut self, id: StudentId) {
        if let Some(next) = self.next_id
            && id >= next
        {
            self.next_id = id.checked_next();
        }
    }
}

#[derive(Debug)]
struct StoreInner {
    state: Mutex<StoreState>,
    snapshot: Option<SnapshotFile>,
}

impl StoreInner {
    async fn create(&self, profile: StudentProfile) -> Result<Student, GatewayError> {
        let mut state = self.state.lock().await;

        let previous_next = state.next_id;
        let id = previous_next
            .ok_or_else(|| GatewayError::Internal("student id space exhausted".to_string()))?;
        let student = Student::from_profile(id, profile);

        state.students.insert(id, student.clone());
        state.next_id = id.checked_next();

        if let Err(e) = self.persist(&state).await {
            state.students.remove(&id);
            state.next_id = previous_next;
            return Err(e);
        }
        Ok(student)
    }

    async fn update(&self, id: StudentId, profile: StudentProfile) -> Result<Student, GatewayError> {
        let mut state = self.state.lock().await;

        let updated = Student::from_profile(id, profile);
        let Some(slot) = state.students.get_mut(&id) else {
            return Err(GatewayError::StudentNotFound(id));
        };
        let previous = std::mem::replace(slot, updated.clone());

        if let Err(e) = self.persist(&state).await {
            state.students.insert(id, previous);
            return Err(e);
        }
        Ok(updated)
    }

    async fn delete(&self, id: StudentId) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;

        let removed = state
            .students
            .remove(&id)
            .ok_or(GatewayError::StudentNotFound(id))?;

        if let Err(e) = self.persist(&state).await {
            state.students.insert(id, removed);
            return Err(e);
        }
        Ok(())
    }

    async fn persist(&self, state: &StoreState) -> Result<(), GatewayError> {
        match &self.snapshot {
            Some(snapshot) => snapshot.write(&state.records()).await,
            None => Ok(()),
        }
    }
}

/// Authoritative set of student records.
///
/// Cloning is cheap and yields a handle to the same records.
///
/// # Concurrency
///
/// - One exclusive lock guards the record map and the ID counter.
/// - Snapshot writes happen while the lock is held; callers waiting on
///   the lock never observe a state that is not yet on disk.
#[derive(Debug, Clone)]
pub struct StudentStore {
    inner: Arc<StoreInner>,
}

impl StudentStore {
    /// Creates an empty store, persisting to `snapshot` when given.
    #[must_use]
    pub fn new(snapshot: Option<SnapshotFile>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(StoreState::new()),
                snapshot,
            }),
        }
    }

    /// Creates an empty store with persistence disabled.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(None)
    }

    /// Opens a persistent store, loading the existing snapshot first.
    ///
    /// The returned store is fully loaded, so it can be shared with
    /// request handlers without racing the initial load. A missing file
    /// yields an empty store; the file is created on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the snapshot exists
    /// but cannot be read, is malformed, or contains duplicate IDs.
    pub async fn open(snapshot: SnapshotFile) -> Result<Self, GatewayError> {
        let records = snapshot.read().await?.unwrap_or_default();
        let store = Self::new(Some(snapshot));
        store.load_initial_data(records).await?;
        Ok(store)
    }

    /// Returns the attached snapshot, if persistence is enabled.
    #[must_use]
    pub fn snapshot_file(&self) -> Option<&SnapshotFile> {
        self.inner.snapshot.as_ref()
    }

    /// Populates the store from previously persisted records.
    ///
    /// Raises the ID counter above the largest loaded ID so later creates
    /// never collide with them. Nothing is written back to the snapshot.
    /// Returns the number of records loaded.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if `records` repeats an
    /// ID or reuses one already in the store. The store is unchanged in
    /// that case.
    pub async fn load_initial_data(&self, records: Vec<Student>) -> Result<usize, GatewayError> {
        let mut state = self.inner.state.lock().await;

        let mut loaded = HashMap::with_capacity(records.len());
        for student in records {
            let id = student.id;
            if state.students.contains_key(&id) || loaded.insert(id, student).is_some() {
                return Err(GatewayError::PersistenceError(format!(
                    "duplicate student id {id} in snapshot"
                )));
            }
        }

        let count = loaded.len();
        for (id, student) in loaded {
            state.observe(id);
            state.students.insert(id, student);
        }
        Ok(count)
    }

    /// Inserts a new record under the next free ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the snapshot write
    /// fails (the insert is rolled back), or [`GatewayError::Internal`]
    /// once the ID range is exhausted.
    pub async fn create(&self, profile: StudentProfile) -> Result<Student, GatewayError> {
        self.detached(move |inner| async move { inner.create(profile).await })
            .await
    }

    /// Returns every record in ascending ID order.
    pub async fn list(&self) -> Vec<Student> {
        self.inner.state.lock().await.records()
    }

    /// Returns the record with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StudentNotFound`] if no such record exists.
    pub async fn get(&self, id: StudentId) -> Result<Student, GatewayError> {
        let state = self.inner.state.lock().await;
        state
            .students
            .get(&id)
            .cloned()
            .ok_or(GatewayError::StudentNotFound(id))
    }

    /// Replaces every field of an existing record except its ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StudentNotFound`] if no such record exists,
    /// or [`GatewayError::PersistenceError`] if the snapshot write fails
    /// (the previous record is restored).
    pub async fn update(
        &self,
        id: StudentId,
        profile: StudentProfile,
    ) -> Result<Student, GatewayError> {
        self.detached(move |inner| async move { inner.update(id, profile).await })
            .await
    }

    /// Removes a record. Its ID is never handed out again.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StudentNotFound`] if no such record exists,
    /// or [`GatewayError::PersistenceError`] if the snapshot write fails
    /// (the record is restored).
    pub async fn delete(&self, id: StudentId) -> Result<(), GatewayError> {
        self.detached(move |inner| async move { inner.delete(id).await })
            .await
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.state.lock().await.students.len()
    }

    /// Returns `true` if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.inner.state.lock().await.students.is_empty()
    }

    /// Runs a mutation on its own task so it completes even if the
    /// caller stops polling.
    async fn detached<T, F, Fut>(&self, op: F) -> Result<T, GatewayError>
    where
        F: FnOnce(Arc<StoreInner>) -> Fut,
        Fut: Future<Output = Result<T, GatewayError>> + Send + 'static,
        T: Send + 'static,
    {
        tokio::spawn(op(Arc::clone(&self.inner)))
            .await
            .map_err(|e| GatewayError::Internal(format!("store mutation task failed: {e}")))?
    }
}
