//! HTTP handlers

mod health;
mod products;
mod users;

pub use health::{health, ready};
pub use products::{
    create_product, delete_product, get_product, list_products, update_product,
};
pub use users::{delete_user, get_user, list_users, login, register, update_user};
