//! Model module - Wire types exchanged with the remote API.
//! Field names follow the API's JSON (camelCase, `_id` identifiers).

pub mod auth;
pub mod item;
pub mod sale;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, UserType};
pub use item::{IdRequest, Item, ItemDraft, ItemEnvelope, MainCategory};
pub use sale::{
    ItemRef, ItemSnapshot, NewSale, NewSaleLine, SaleEnvelope, SaleLine, SaleRecord,
    SalesEnvelope,
};
pub use user::{NewUser, Position, StatusRequest, User, UserUpdate};
