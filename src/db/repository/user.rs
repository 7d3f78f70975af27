use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::enums::AccountType;
use crate::models::User;

const USER_SELECT: &str = "SELECT u.id, u.email, u.phone, a.name, u.is_pharmacist, p.full_name
     FROM users u
     JOIN account_types a ON u.account_type_id = a.id
     LEFT JOIN user_profiles p ON p.user_id = u.id";

/// Id of a seeded account type row.
pub fn account_type_id(conn: &Connection, account_type: AccountType) -> Result<i64, DatabaseError> {
    conn.query_row(
        "SELECT id FROM account_types WHERE name = ?1",
        params![account_type.as_str()],
        |row| row.get(0),
    )
    .map_err(DatabaseError::from)
}

/// Look up a user by email within one account type.
pub fn find_user_by_email(
    conn: &Connection,
    email: &str,
    account_type: AccountType,
) -> Result<Option<User>, DatabaseError> {
    let sql = format!("{USER_SELECT} WHERE u.email = ?1 AND a.name = ?2");
    let row = conn
        .query_row(&sql, params![email, account_type.as_str()], user_row)
        .optional()?;
    row.map(user_from_row).transpose()
}

/// Look up a user by phone within one account type.
///
/// Professional accounts log in by phone number instead of email.
pub fn find_user_by_phone(
    conn: &Connection,
    phone: &str,
    account_type: AccountType,
) -> Result<Option<User>, DatabaseError> {
    let sql = format!("{USER_SELECT} WHERE u.phone = ?1 AND a.name = ?2");
    let row = conn
        .query_row(&sql, params![phone, account_type.as_str()], user_row)
        .optional()?;
    row.map(user_from_row).transpose()
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>, DatabaseError> {
    let sql = format!("{USER_SELECT} WHERE u.id = ?1");
    let row = conn.query_row(&sql, params![id], user_row).optional()?;
    row.map(user_from_row).transpose()
}

/// Insert a user row and return its id. The profile row is inserted
/// separately so both can share the auto-registration transaction.
pub fn insert_user(
    conn: &Connection,
    email: Option<&str>,
    phone: Option<&str>,
    account_type: AccountType,
) -> Result<i64, DatabaseError> {
    let type_id = account_type_id(conn, account_type)?;
    conn.execute(
        "INSERT INTO users (email, phone, account_type_id, is_pharmacist)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            email,
            phone,
            type_id,
            (account_type == AccountType::Pharmacist) as i32,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_profile(
    conn: &Connection,
    user_id: i64,
    full_name: &str,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO user_profiles (user_id, full_name) VALUES (?1, ?2)",
        params![user_id, full_name],
    )?;
    Ok(conn.last_insert_rowid())
}

// Internal row type, mapped before enum parsing
struct UserRow {
    id: i64,
    email: Option<String>,
    phone: Option<String>,
    account_type: String,
    is_pharmacist: i32,
    full_name: Option<String>,
}

fn user_row(row: &rusqlite::Row<'_>) -> Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        phone: row.get(2)?,
        account_type: row.get(3)?,
        is_pharmacist: row.get(4)?,
        full_name: row.get(5)?,
    })
}

fn user_from_row(row: UserRow) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.id,
        email: row.email,
        phone: row.phone,
        account_type: AccountType::from_str(&row.account_type)?,
        is_pharmacist: row.is_pharmacist != 0,
        full_name: row.full_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    #[test]
    fn insert_and_find_by_email() {
        let conn = open_memory_database().unwrap();
        let id = insert_user(&conn, Some("a@b.com"), None, AccountType::Standard).unwrap();
        insert_profile(&conn, id, "a").unwrap();

        let user = find_user_by_email(&conn, "a@b.com", AccountType::Standard)
            .unwrap()
            .expect("user should exist");
        assert_eq!(user.id, id);
        assert_eq!(user.full_name.as_deref(), Some("a"));
        assert!(!user.is_pharmacist);
    }

    #[test]
    fn lookup_is_scoped_to_account_type() {
        let conn = open_memory_database().unwrap();
        insert_user(&conn, Some("a@b.com"), None, AccountType::Standard).unwrap();

        let miss = find_user_by_email(&conn, "a@b.com", AccountType::Pharmacist).unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn professional_found_by_phone() {
        let conn = open_memory_database().unwrap();
        let id = insert_user(&conn, None, Some("+33600000001"), AccountType::Professional).unwrap();

        let user = find_user_by_phone(&conn, "+33600000001", AccountType::Professional)
            .unwrap()
            .expect("user should exist");
        assert_eq!(user.id, id);
        assert_eq!(user.account_type, AccountType::Professional);
        // No profile yet — joined name is absent, not an error
        assert!(user.full_name.is_none());
    }

    #[test]
    fn pharmacist_flag_set_from_account_type() {
        let conn = open_memory_database().unwrap();
        let id = insert_user(&conn, Some("ph@x.com"), None, AccountType::Pharmacist).unwrap();
        let user = get_user(&conn, id).unwrap().unwrap();
        assert!(user.is_pharmacist);
    }
}
