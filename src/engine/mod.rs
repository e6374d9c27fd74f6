pub mod bridge;
pub mod error;
pub mod karaoke;
pub mod layouter;
pub mod measure;
