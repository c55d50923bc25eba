//! Nail-art entries: the designs shown in the gallery.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/entries` | List entries with category name |
//! | GET | `/entries/{id}` | Get entry |
//! | POST | `/entries` | Create entry under an existing category |
//! | PUT | `/entries/{id}` | Partially update entry |
//! | DELETE | `/entries/{id}` | Delete entry |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::EntryService;
