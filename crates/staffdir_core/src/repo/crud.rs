//! Generic CRUD store contract.
//!
//! # Responsibility
//! - Name the persistence operations every entity store exposes, independent
//!   of the concrete entity and id types.
//!
//! # Invariants
//! - `save` is the single write entry point for both insert and update; which
//!   one runs is decided by id presence on the entity.

use crate::repo::employee_repo::RepoResult;

/// Store-agnostic CRUD operations over one entity type.
///
/// Concrete repositories pin down `Entity` and `Id` and may extend this
/// contract with entity-specific lookups.
pub trait CrudRepository {
    /// Entity type persisted by this store.
    type Entity;
    /// Store-generated surrogate identifier type.
    type Id;

    /// Persists the entity, inserting or updating by id presence.
    ///
    /// # Contract
    /// - A transient entity (no id) is inserted; the returned copy carries
    ///   the store-generated id.
    /// - An entity with an id updates its existing row in place; the id never
    ///   changes.
    fn save(&self, entity: &Self::Entity) -> RepoResult<Self::Entity>;

    /// Gets one entity by id, `Ok(None)` when absent.
    fn find_by_id(&self, id: Self::Id) -> RepoResult<Option<Self::Entity>>;

    /// Lists all entities in stable id order.
    fn find_all(&self) -> RepoResult<Vec<Self::Entity>>;

    /// Hard-deletes one entity by id.
    fn delete_by_id(&self, id: Self::Id) -> RepoResult<()>;
}
