pub mod connectivity;
pub mod repositories;
pub mod transport;
