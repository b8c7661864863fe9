use rusqlite::Connection;
use staffdir_core::db::migrations::latest_version;
use staffdir_core::db::open_db_in_memory;
use staffdir_core::{
    CrudRepository, Employee, EmployeeRepository, EmployeeService, EmployeeValidationError,
    RepoError, SqliteEmployeeRepository,
};

#[test]
fn save_assigns_positive_generated_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let employee = Employee::new("tony", "stark", "tony@gmail.com");
    assert!(employee.is_transient());

    let saved = repo.save(&employee).unwrap();
    assert!(!saved.is_transient());
    assert!(saved.id.unwrap() > 0);
    assert_eq!(saved.first_name, "tony");
    assert_eq!(saved.last_name, "stark");
    assert_eq!(saved.email, "tony@gmail.com");
}

#[test]
fn generated_ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let first = repo
        .save(&Employee::new("tony", "stark", "tony@gmail.com"))
        .unwrap();
    repo.delete_by_id(first.id.unwrap()).unwrap();

    let second = repo.save(&Employee::new("john", "cena", "john@")).unwrap();
    assert!(second.id.unwrap() > first.id.unwrap());
}

#[test]
fn find_all_returns_every_saved_employee_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    repo.save(&Employee::new("john", "cena", "john@")).unwrap();
    repo.save(&Employee::new("tony", "stark", "tony@gmail.com"))
        .unwrap();

    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].id.unwrap() < all[1].id.unwrap());
    assert_eq!(all[0].first_name, "john");
    assert_eq!(all[1].first_name, "tony");
}

#[test]
fn find_by_id_round_trips_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let saved = repo
        .save(&Employee::new("tony", "stark", "tony@gmail.com"))
        .unwrap();

    let loaded = repo.find_by_id(saved.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn find_by_id_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_id(42).unwrap().is_none());
}

#[test]
fn find_by_email_returns_exact_match_or_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    repo.save(&Employee::new("john", "cena", "john@")).unwrap();
    let saved = repo
        .save(&Employee::new("tony", "stark", "tony@gmail.com"))
        .unwrap();

    let found = repo.find_by_email("tony@gmail.com").unwrap().unwrap();
    assert_eq!(found, saved);

    assert!(repo.find_by_email("nobody@gmail.com").unwrap().is_none());
}

#[test]
fn find_by_email_with_duplicates_returns_lowest_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let first = repo
        .save(&Employee::new("tony", "stark", "shared@corp.test"))
        .unwrap();
    repo.save(&Employee::new("anthony", "stark", "shared@corp.test"))
        .unwrap();

    let found = repo.find_by_email("shared@corp.test").unwrap().unwrap();
    assert_eq!(found.id, first.id);
}

#[test]
fn resave_updates_row_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let saved = repo
        .save(&Employee::new("tony", "stark", "tony@gmail.com"))
        .unwrap();

    let mut fetched = repo.find_by_id(saved.id.unwrap()).unwrap().unwrap();
    fetched.first_name = "john".to_string();
    fetched.last_name = "cena".to_string();
    fetched.email = "john@gmail.com".to_string();

    let updated = repo.save(&fetched).unwrap();
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.first_name, "john");
    assert_eq!(updated.last_name, "cena");
    assert_eq!(updated.email, "john@gmail.com");

    let reloaded = repo.find_by_id(saved.id.unwrap()).unwrap().unwrap();
    assert_eq!(reloaded, updated);
    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn save_with_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let mut ghost = Employee::new("tony", "stark", "tony@gmail.com");
    ghost.id = Some(99);

    let err = repo.save(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
}

#[test]
fn delete_by_id_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let saved = repo
        .save(&Employee::new("tony", "stark", "tony@gmail.com"))
        .unwrap();

    repo.delete_by_id(saved.id.unwrap()).unwrap();
    assert!(repo.find_by_id(saved.id.unwrap()).unwrap().is_none());
    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn delete_by_id_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let err = repo.delete_by_id(7).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(7)));
}

#[test]
fn find_by_name_returns_unique_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    repo.save(&Employee::new("john", "cena", "john@")).unwrap();
    let saved = repo
        .save(&Employee::new("tony", "stark", "tony@gmail.com"))
        .unwrap();

    let found = repo.find_by_name("tony", "stark").unwrap();
    assert_eq!(found, saved);
}

#[test]
fn find_by_name_without_match_returns_name_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let err = repo.find_by_name("peter", "parker").unwrap_err();
    assert!(matches!(
        err,
        RepoError::NameNotFound {
            first_name,
            last_name,
        } if first_name == "peter" && last_name == "parker"
    ));
}

#[test]
fn find_by_name_with_ambiguous_match_returns_name_not_unique() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    repo.save(&Employee::new("tony", "stark", "tony@gmail.com"))
        .unwrap();
    repo.save(&Employee::new("tony", "stark", "tony.stark@corp.test"))
        .unwrap();

    let err = repo.find_by_name("tony", "stark").unwrap_err();
    assert!(matches!(err, RepoError::NameNotUnique { matches: 2, .. }));
}

#[test]
fn validation_failure_blocks_save() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let blank_name = Employee::new("", "stark", "tony@gmail.com");
    let err = repo.save(&blank_name).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(EmployeeValidationError::BlankFirstName)
    ));

    let bad_email = Employee::new("tony", "stark", "not-an-address");
    let err = repo.save(&bad_email).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(EmployeeValidationError::InvalidEmail(_))
    ));

    // Domainless addresses exist in the historical data set and must pass.
    repo.save(&Employee::new("john", "cena", "john@")).unwrap();
}

#[test]
fn read_paths_reject_rows_that_fail_validation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    // Bypass the repository to plant a row no write path would accept.
    conn.execute(
        "INSERT INTO employees (first_name, last_name, email)
         VALUES ('', 'stark', 'tony@gmail.com');",
        [],
    )
    .unwrap();

    let err = repo.find_all().unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(EmployeeValidationError::BlankFirstName)
    ));
}

#[test]
fn rows_with_non_positive_id_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    conn.execute(
        "INSERT INTO employees (id, first_name, last_name, email)
         VALUES (0, 'tony', 'stark', 'tony@gmail.com');",
        [],
    )
    .unwrap();

    let err = repo.find_by_id(0).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_employees_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("employees"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_employees_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "employees",
            column: "email"
        })
    ));
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let service = EmployeeService::new(repo);

    let registered = service.register("tony", "stark", "tony@gmail.com").unwrap();
    assert!(!registered.is_transient());

    let mut fetched = service
        .get_employee(registered.id.unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(fetched, registered);

    fetched.email = "tony.stark@corp.test".to_string();
    let updated = service.save(&fetched).unwrap();
    assert_eq!(updated.id, registered.id);

    let by_email = service
        .find_by_email("tony.stark@corp.test")
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, registered.id);

    let by_name = service.find_by_name("tony", "stark").unwrap();
    assert_eq!(by_name.id, registered.id);

    service.delete_employee(registered.id.unwrap()).unwrap();
    assert!(service.list_employees().unwrap().is_empty());
}

#[test]
fn directory_scenario_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let tony = repo
        .save(&Employee::new("tony", "stark", "tony@gmail.com"))
        .unwrap();
    let john = repo.save(&Employee::new("john", "cena", "john@")).unwrap();
    assert_eq!(tony.id, Some(1));
    assert_eq!(john.id, Some(2));

    assert_eq!(repo.find_all().unwrap().len(), 2);

    let by_email = repo.find_by_email("tony@gmail.com").unwrap().unwrap();
    assert_eq!(by_email.id, Some(1));

    repo.delete_by_id(1).unwrap();
    assert!(repo.find_by_id(1).unwrap().is_none());

    let remaining = repo.find_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, Some(2));
}
