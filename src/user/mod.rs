//! Users of the application and their registration.

mod core;
mod endpoints;
mod service;

pub use core::{Credentials, Profile, User, UserForm};
pub use endpoints::{
    create_user_endpoint, delete_user_endpoint, get_user_endpoint, get_users_endpoint,
    update_user_endpoint,
};
pub use service::UserService;
