//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `employees` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Employee::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - The by-name lookup returns exactly one record or a typed error; it never
//!   picks an arbitrary row from an ambiguous match.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId, EmployeeValidationError};
use crate::repo::crud::CrudRepository;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email
FROM employees";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EmployeeValidationError),
    Db(DbError),
    NotFound(EmployeeId),
    /// The unique by-name lookup matched no row.
    NameNotFound {
        first_name: String,
        last_name: String,
    },
    /// The unique by-name lookup matched more than one row.
    NameNotUnique {
        first_name: String,
        last_name: String,
        matches: usize,
    },
    InvalidData(String),
    /// Connection has no applied schema; open it via `db::open_db`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::NameNotFound {
                first_name,
                last_name,
            } => write!(f, "no employee named `{first_name} {last_name}`"),
            Self::NameNotUnique {
                first_name,
                last_name,
                matches,
            } => write!(
                f,
                "{matches} employees named `{first_name} {last_name}`; expected exactly one"
            ),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted employee data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version is {actual_version}, expected {expected_version}; migrations have not been applied"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the employee directory.
///
/// Extends the generic CRUD contract with the directory's alternate lookup
/// keys. The by-name lookup is a single parameterized query; callers needing
/// positional, named, or native-dialect bindings all go through it.
pub trait EmployeeRepository: CrudRepository<Entity = Employee, Id = EmployeeId> {
    /// Finds one employee by exact email, `Ok(None)` when absent.
    ///
    /// Email carries no uniqueness constraint; with duplicates the lowest-id
    /// row is returned.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>>;

    /// Finds the single employee with the given first and last name.
    ///
    /// # Errors
    /// - `RepoError::NameNotFound` when no row matches.
    /// - `RepoError::NameNotUnique` when several rows match.
    fn find_by_name(&self, first_name: &str, last_name: &str) -> RepoResult<Employee>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when no migration has run.
    /// - `RepoError::MissingRequiredTable` / `MissingRequiredColumn` when the
    ///   schema does not match what this repository queries.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CrudRepository for SqliteEmployeeRepository<'_> {
    type Entity = Employee;
    type Id = EmployeeId;

    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        employee.validate()?;

        match employee.id {
            None => {
                self.conn.execute(
                    "INSERT INTO employees (
                        first_name,
                        last_name,
                        email
                    ) VALUES (?1, ?2, ?3);",
                    params![employee.first_name, employee.last_name, employee.email],
                )?;

                let mut saved = employee.clone();
                saved.id = Some(self.conn.last_insert_rowid());
                Ok(saved)
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE employees
                     SET
                        first_name = ?1,
                        last_name = ?2,
                        email = ?3
                     WHERE id = ?4;",
                    params![employee.first_name, employee.last_name, employee.email, id],
                )?;

                if changed == 0 {
                    return Err(RepoError::NotFound(id));
                }

                Ok(employee.clone())
            }
        }
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE email = ?1
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn find_by_name(&self, first_name: &str, last_name: &str) -> RepoResult<Employee> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE first_name = ?1
               AND last_name = ?2
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query(params![first_name, last_name])?;
        let mut matched = Vec::new();
        while let Some(row) = rows.next()? {
            matched.push(parse_employee_row(row)?);
        }

        match matched.len() {
            0 => Err(RepoError::NameNotFound {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            }),
            1 => Ok(matched.remove(0)),
            count => Err(RepoError::NameNotUnique {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                matches: count,
            }),
        }
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: EmployeeId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "non-positive id `{id}` in employees.id"
        )));
    }

    let employee = Employee {
        id: Some(id),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
    };
    employee.validate()?;
    Ok(employee)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version == 0 {
        return Err(RepoError::UninitializedConnection {
            expected_version: latest_version(),
            actual_version,
        });
    }

    if !table_exists(conn, "employees")? {
        return Err(RepoError::MissingRequiredTable("employees"));
    }

    for column in ["id", "first_name", "last_name", "email"] {
        if !table_has_column(conn, "employees", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "employees",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
