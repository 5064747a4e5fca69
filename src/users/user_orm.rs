use std::fmt;

use crate::dbase::DbPool;
use crate::users::user_models::{CreateUser, ModifyUser, User};

pub const UNIQUE_EMAIL: &str = "users_email_unique";
pub const UNIQUE_NICKNAME: &str = "users_nickname_unique";

#[derive(Debug, Clone, PartialEq)]
pub enum UserOrmError {
    /// Error getting a database connection from the pool.
    ConnectionPool(String),
    /// Error executing a query in the database.
    DataBase(String),
    /// The email is already used by another user.
    EmailAlreadyUsed,
    /// The nickname is already used by another user.
    NicknameAlreadyUsed,
}

impl std::error::Error for UserOrmError {}

impl fmt::Display for UserOrmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            UserOrmError::ConnectionPool(info) => write!(f, "ConnectionPool: {}", info),
            UserOrmError::DataBase(info) => write!(f, "DataBase: {}", info),
            UserOrmError::EmailAlreadyUsed => write!(f, "The given email is already in use."),
            UserOrmError::NicknameAlreadyUsed => write!(f, "The given nickname is already in use."),
        }
    }
}

impl From<UserOrmError> for String {
    fn from(err: UserOrmError) -> Self {
        err.to_string()
    }
}

pub trait UserOrm {
    /// Get an entity (user) by ID.
    fn get_user_by_id(&self, id: i32) -> Result<Option<User>, UserOrmError>;

    /// Find an entity (user) by email.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserOrmError>;

    /// Find an entity (user) by nickname.
    fn find_user_by_nickname(&self, nickname: &str) -> Result<Option<User>, UserOrmError>;

    /// Add a new entry (user).
    fn create_user(&self, create_user: CreateUser) -> Result<User, UserOrmError>;

    /// Modify an entity (user).
    fn modify_user(&self, id: i32, modify_user: ModifyUser) -> Result<Option<User>, UserOrmError>;
}

#[cfg(not(all(test, feature = "mockdata")))]
pub fn get_user_orm_app(pool: DbPool) -> impls::UserOrmApp {
    impls::UserOrmApp::new(pool)
}
#[cfg(all(test, feature = "mockdata"))]
pub fn get_user_orm_app(_: DbPool) -> tests::UserOrmApp {
    tests::UserOrmApp::new()
}

#[cfg(not(all(test, feature = "mockdata")))]
pub mod impls {
    use std::time::Instant as tm;

    use diesel::{
        prelude::*,
        result::{DatabaseErrorKind, Error as DieselError},
    };
    use log::{info, log_enabled, Level::Info};

    use crate::{dbase, schema};
    use crate::users::user_models::{CreateUser, ModifyUser, User};
    use crate::users::user_orm::{UserOrm, UserOrmError, UNIQUE_EMAIL, UNIQUE_NICKNAME};

    /// Map a diesel error, recognizing violations of the unique indexes on "email" and "nickname".
    fn map_db_error(name: &str, err: DieselError) -> UserOrmError {
        if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
            match info.constraint_name() {
                Some(UNIQUE_EMAIL) => return UserOrmError::EmailAlreadyUsed,
                Some(UNIQUE_NICKNAME) => return UserOrmError::NicknameAlreadyUsed,
                _ => {}
            }
        }
        UserOrmError::DataBase(format!("{}: {}", name, err.to_string()))
    }

    #[derive(Debug, Clone)]
    pub struct UserOrmApp {
        pub pool: dbase::DbPool,
    }

    impl UserOrmApp {
        pub fn new(pool: dbase::DbPool) -> Self {
            UserOrmApp { pool }
        }
        pub fn get_conn(&self) -> Result<dbase::DbPooledConnection, UserOrmError> {
            (&self.pool).get().map_err(|e| UserOrmError::ConnectionPool(e.to_string()))
        }
    }

    impl UserOrm for UserOrmApp {
        /// Get an entity (user) by ID.
        fn get_user_by_id(&self, id: i32) -> Result<Option<User>, UserOrmError> {
            let timer = if log_enabled!(Info) { Some(tm::now()) } else { None };
            // Get a connection from the P2D2 pool.
            let mut conn = self.get_conn()?;
            // Run query using Diesel to find user by id and return it.
            let opt_user: Option<User> = schema::users::table
                .filter(schema::users::dsl::id.eq(id))
                .select(User::as_select())
                .first::<User>(&mut conn)
                .optional()
                .map_err(|e| map_db_error("get_user_by_id", e))?;

            if let Some(timer) = timer {
                info!("get_user_by_id() time: {}", format!("{:.2?}", timer.elapsed()));
            }
            Ok(opt_user)
        }

        /// Find an entity (user) by email.
        fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserOrmError> {
            let timer = if log_enabled!(Info) { Some(tm::now()) } else { None };

            if email.len() == 0 {
                return Ok(None);
            }
            // Get a connection from the P2D2 pool.
            let mut conn = self.get_conn()?;

            let opt_user: Option<User> = schema::users::table
                .filter(schema::users::dsl::email.eq(email))
                .select(User::as_select())
                .first::<User>(&mut conn)
                .optional()
                .map_err(|e| map_db_error("find_user_by_email", e))?;

            if let Some(timer) = timer {
                info!("find_user_by_email() time: {}", format!("{:.2?}", timer.elapsed()));
            }
            Ok(opt_user)
        }

        /// Find an entity (user) by nickname.
        fn find_user_by_nickname(&self, nickname: &str) -> Result<Option<User>, UserOrmError> {
            let timer = if log_enabled!(Info) { Some(tm::now()) } else { None };

            if nickname.len() == 0 {
                return Ok(None);
            }
            // Get a connection from the P2D2 pool.
            let mut conn = self.get_conn()?;

            let opt_user: Option<User> = schema::users::table
                .filter(schema::users::dsl::nickname.eq(nickname))
                .select(User::as_select())
                .first::<User>(&mut conn)
                .optional()
                .map_err(|e| map_db_error("find_user_by_nickname", e))?;

            if let Some(timer) = timer {
                info!("find_user_by_nickname() time: {}", format!("{:.2?}", timer.elapsed()));
            }
            Ok(opt_user)
        }

        /// Add a new entry (user).
        fn create_user(&self, create_user: CreateUser) -> Result<User, UserOrmError> {
            let timer = if log_enabled!(Info) { Some(tm::now()) } else { None };

            let create_user2 = CreateUser::new(
                &create_user.name,
                &create_user.email,
                &create_user.password,
                create_user.nickname.as_deref(),
            );
            // Get a connection from the P2D2 pool.
            let mut conn = self.get_conn()?;
            // Run query using Diesel to add a new user entry.
            let user: User = diesel::insert_into(schema::users::table)
                .values(create_user2)
                .returning(User::as_returning())
                .get_result(&mut conn)
                .map_err(|e| map_db_error("create_user", e))?;

            if let Some(timer) = timer {
                info!("create_user() time: {}", format!("{:.2?}", timer.elapsed()));
            }
            Ok(user)
        }

        /// Modify an entity (user).
        fn modify_user(&self, id: i32, modify_user: ModifyUser) -> Result<Option<User>, UserOrmError> {
            let timer = if log_enabled!(Info) { Some(tm::now()) } else { None };

            let modify_user2 = ModifyUser::new(
                modify_user.name,
                modify_user.email,
                modify_user.password,
                modify_user.nickname,
            );
            // Get a connection from the P2D2 pool.
            let mut conn = self.get_conn()?;
            // Run query using Diesel to full or partially modify the user entry.
            let opt_user: Option<User> = diesel::update(schema::users::dsl::users.find(id))
                .set(&modify_user2)
                .returning(User::as_returning())
                .get_result(&mut conn)
                .optional()
                .map_err(|e| map_db_error("modify_user", e))?;

            if let Some(timer) = timer {
                info!("modify_user() time: {}", format!("{:.2?}", timer.elapsed()));
            }
            Ok(opt_user)
        }
    }
}
