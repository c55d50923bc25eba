//! Category catalog: the groups nail-art entries are filed under.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/categories` | List categories with their entry summaries |
//! | POST | `/categories` | Create category |
//! | PUT | `/categories/{id}` | Update category name/description |
//! | DELETE | `/categories/{id}` | Delete category, detaching its entries |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
