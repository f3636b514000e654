use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_types::Integer;
use diesel::sqlite::SqliteConnection;

use crate::{
    models::user_models::{NewUser, User, UserChangeset},
    schema::users,
};

/// One function per statement; each runs exactly one round trip.
pub struct UserRepository;

impl UserRepository {
    /// `SELECT 1`, used by the connectivity check.
    pub fn ping(conn: &mut SqliteConnection) -> Result<i32, DieselError> {
        diesel::select(1.into_sql::<Integer>()).get_result(conn)
    }

    pub fn list(conn: &mut SqliteConnection) -> Result<Vec<User>, DieselError> {
        users::table.select(User::as_select()).load(conn)
    }

    pub fn insert(conn: &mut SqliteConnection, new_user: &NewUser) -> Result<usize, DieselError> {
        diesel::insert_into(users::table)
            .values(new_user)
            .execute(conn)
    }

    /// First row with this name; duplicates are not reported.
    pub fn find_by_student_name(
        conn: &mut SqliteConnection,
        student_name: &str,
    ) -> Result<Option<User>, DieselError> {
        users::table
            .filter(users::student_name.eq(student_name))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_email(
        conn: &mut SqliteConnection,
        email: &str,
    ) -> Result<Option<User>, DieselError> {
        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<User>, DieselError> {
        users::table
            .find(id)
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    /// Applies `changes` to every row with this name. The caller must not
    /// pass an empty changeset; diesel refuses to build `SET` with no columns.
    pub fn update_by_student_name(
        conn: &mut SqliteConnection,
        student_name: &str,
        changes: &UserChangeset,
    ) -> Result<usize, DieselError> {
        diesel::update(users::table.filter(users::student_name.eq(student_name)))
            .set(changes)
            .execute(conn)
    }

    pub fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> Result<usize, DieselError> {
        diesel::delete(users::table.find(id)).execute(conn)
    }
}
