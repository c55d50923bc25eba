mod category;

pub use category::{Category, CategoryChanges, CategoryEntryRef, NewCategory};
