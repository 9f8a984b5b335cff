pub mod core;
pub mod filter;
pub mod pagination;
pub mod request;
pub mod sort;
