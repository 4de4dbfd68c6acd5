//! The user service: validation and duplicate-email handling on top of the user store.

use crate::{
    Error,
    database_id::DatabaseId,
    db::SQLiteStore,
    password::PasswordHash,
    user::core::{Credentials, Profile, User, UserForm},
};

const KIND: &str = "usuário";

/// Handles registering, fetching, updating, deleting and authenticating users.
#[derive(Debug, Clone)]
pub struct UserService {
    store: SQLiteStore<User>,
    password_cost: u32,
}

impl UserService {
    /// Create a user service that hashes passwords with `password_cost`.
    ///
    /// Use [PasswordHash::DEFAULT_COST] outside of tests.
    pub fn new(store: SQLiteStore<User>, password_cost: u32) -> Self {
        Self {
            store,
            password_cost,
        }
    }

    /// Register a new user.
    ///
    /// There is no check for an existing email before the insert, the UNIQUE
    /// constraint on the email column decides which of two concurrent
    /// registrations wins.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] for an invalid form or
    /// [Error::DuplicateEmail] if the email is already registered.
    pub fn create(&self, form: UserForm) -> Result<User, Error> {
        let new_user = form.validate(self.password_cost)?;
        let email = new_user.email.clone();

        self.store
            .create(new_user)
            .map_err(|error| duplicate_email_or(error, email))
    }

    /// Get the user with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::ItemNotFound] if there is no such user.
    pub fn get(&self, id: DatabaseId) -> Result<User, Error> {
        self.store.get(id).map_err(|error| error.for_item(KIND, id))
    }

    /// Get all users ordered by ID.
    pub fn get_all(&self) -> Result<Vec<User>, Error> {
        self.store.get_all()
    }

    /// Overwrite the name, email and password of the user with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] for an invalid form,
    /// [Error::ItemNotFound] if there is no such user, or
    /// [Error::DuplicateEmail] if the email belongs to another user.
    pub fn update(&self, id: DatabaseId, form: UserForm) -> Result<User, Error> {
        let new_user = form.validate(self.password_cost)?;
        let email = new_user.email.clone();

        self.store
            .update(id, new_user)
            .map_err(|error| duplicate_email_or(error, email).for_item(KIND, id))
    }

    /// Delete the user with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::ItemNotFound] if there is no such user.
    pub fn delete(&self, id: DatabaseId) -> Result<(), Error> {
        self.store
            .delete(id)
            .map_err(|error| error.for_item(KIND, id))
    }

    /// Check `credentials` against the stored password hash.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCredentials] if the email is not registered or
    /// the password is wrong, and [Error::HashingError] if the stored hash
    /// could not be checked.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<Profile, Error> {
        let user = match self.store.get_by("email", &credentials.email.trim()) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::InvalidCredentials),
            Err(error) => return Err(error),
        };

        let is_password_valid = verify_password(&user.password_hash, &credentials.password)?;

        if !is_password_valid {
            return Err(Error::InvalidCredentials);
        }

        Ok(user.into())
    }
}

fn verify_password(password_hash: &PasswordHash, raw_password: &str) -> Result<bool, Error> {
    password_hash.verify(raw_password).map_err(|error| {
        tracing::error!("Unhandled error while verifying credentials: {error}");
        Error::HashingError(error.to_string())
    })
}

fn duplicate_email_or(error: Error, email: String) -> Error {
    match error {
        Error::UniqueViolation(constraint) if constraint.ends_with("usuario.email") => {
            Error::DuplicateEmail(email)
        }
        error => error,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::{SQLiteStore, initialize},
        user::core::{Credentials, Profile, UserForm},
    };

    use super::UserService;

    fn get_service() -> UserService {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        UserService::new(SQLiteStore::new(Arc::new(Mutex::new(connection))), 4)
    }

    fn form(name: &str, email: &str, password: &str) -> UserForm {
        UserForm {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[test]
    fn create_then_get_returns_same_user() {
        let service = get_service();

        let user = service
            .create(form("Ana", "ana@x.com", "12345678"))
            .unwrap();

        assert!(user.id > 0);
        assert_eq!(service.get(user.id), Ok(user));
    }

    #[test]
    fn create_fails_on_duplicate_email_and_keeps_original() {
        let service = get_service();
        let original = service
            .create(form("Ana", "ana@x.com", "12345678"))
            .unwrap();

        let result = service.create(form("Outra Ana", "ana@x.com", "87654321"));

        assert_eq!(result, Err(Error::DuplicateEmail("ana@x.com".to_owned())));
        assert_eq!(service.get_all(), Ok(vec![original]));
    }

    #[test]
    fn get_fails_with_non_existent_id() {
        let service = get_service();

        assert_eq!(
            service.get(999),
            Err(Error::ItemNotFound {
                kind: "usuário",
                id: 999
            })
        );
    }

    #[test]
    fn update_overwrites_user() {
        let service = get_service();
        let user = service
            .create(form("Ana", "ana@x.com", "12345678"))
            .unwrap();

        let updated = service
            .update(user.id, form("Ana Maria", "anamaria@x.com", "abcdefgh"))
            .unwrap();

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.email, "anamaria@x.com");
        assert_eq!(service.get(user.id), Ok(updated));
    }

    #[test]
    fn update_fails_with_non_existent_id() {
        let service = get_service();

        let result = service.update(42, form("Ana", "ana@x.com", "12345678"));

        assert_eq!(
            result,
            Err(Error::ItemNotFound {
                kind: "usuário",
                id: 42
            })
        );
        assert_eq!(service.get_all(), Ok(vec![]));
    }

    #[test]
    fn update_fails_on_email_of_another_user() {
        let service = get_service();
        service
            .create(form("Ana", "ana@x.com", "12345678"))
            .unwrap();
        let bruno = service
            .create(form("Bruno", "bruno@x.com", "12345678"))
            .unwrap();

        let result = service.update(bruno.id, form("Bruno", "ana@x.com", "12345678"));

        assert_eq!(result, Err(Error::DuplicateEmail("ana@x.com".to_owned())));
        assert_eq!(service.get(bruno.id), Ok(bruno));
    }

    #[test]
    fn delete_then_get_fails() {
        let service = get_service();
        let user = service
            .create(form("Ana", "ana@x.com", "12345678"))
            .unwrap();

        service.delete(user.id).unwrap();

        assert_eq!(
            service.get(user.id),
            Err(Error::ItemNotFound {
                kind: "usuário",
                id: user.id
            })
        );
    }

    #[test]
    fn delete_fails_with_non_existent_id() {
        let service = get_service();

        assert!(matches!(
            service.delete(7),
            Err(Error::ItemNotFound { id: 7, .. })
        ));
    }

    #[test]
    fn get_all_after_creates_and_deletes() {
        let service = get_service();
        let users: Vec<_> = (0..5)
            .map(|i| {
                service
                    .create(form("Ana", &format!("ana{i}@x.com"), "12345678"))
                    .unwrap()
            })
            .collect();

        service.delete(users[1].id).unwrap();
        service.delete(users[3].id).unwrap();

        assert_eq!(service.get_all().unwrap().len(), 3);
    }

    #[test]
    fn authenticate_returns_profile() {
        let service = get_service();
        let user = service
            .create(form("Ana", "ana@x.com", "12345678"))
            .unwrap();

        let profile = service
            .authenticate(&Credentials {
                email: "ana@x.com".to_owned(),
                password: "12345678".to_owned(),
            })
            .unwrap();

        assert_eq!(
            profile,
            Profile {
                id: user.id,
                name: "Ana".to_owned(),
                email: "ana@x.com".to_owned(),
            }
        );
    }

    #[test]
    fn authenticate_fails_on_wrong_password() {
        let service = get_service();
        service
            .create(form("Ana", "ana@x.com", "12345678"))
            .unwrap();

        let result = service.authenticate(&Credentials {
            email: "ana@x.com".to_owned(),
            password: "wrongpassword".to_owned(),
        });

        assert_eq!(result, Err(Error::InvalidCredentials));
    }

    #[test]
    fn authenticate_fails_on_unknown_email() {
        let service = get_service();

        let result = service.authenticate(&Credentials {
            email: "nobody@x.com".to_owned(),
            password: "12345678".to_owned(),
        });

        assert_eq!(result, Err(Error::InvalidCredentials));
    }
}
