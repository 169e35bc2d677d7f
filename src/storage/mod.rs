mod store;

pub use store::{RecordStore, StoreError};
