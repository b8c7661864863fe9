//! Employee use-case service.
//!
//! # Responsibility
//! - Provide stable directory entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoResult};

/// Use-case service wrapper for employee directory operations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new employee from raw fields.
    ///
    /// # Contract
    /// - Builds a transient record and persists it in one step.
    /// - Returns the stored record carrying its assigned id.
    pub fn register(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> RepoResult<Employee> {
        self.repo
            .save(&Employee::new(first_name, last_name, email))
    }

    /// Persists the given record, inserting or updating by id presence.
    pub fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        self.repo.save(employee)
    }

    /// Gets one employee by store-assigned id.
    pub fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.repo.find_by_id(id)
    }

    /// Lists all employees in stable id order.
    pub fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        self.repo.find_all()
    }

    /// Finds one employee by exact email.
    pub fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        self.repo.find_by_email(email)
    }

    /// Finds the single employee with the given first and last name.
    ///
    /// Returns repository-level not-found or ambiguity errors unchanged.
    pub fn find_by_name(&self, first_name: &str, last_name: &str) -> RepoResult<Employee> {
        self.repo.find_by_name(first_name, last_name)
    }

    /// Hard-deletes an employee by id.
    pub fn delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        self.repo.delete_by_id(id)
    }
}
