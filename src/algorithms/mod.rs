pub mod a_star;
pub mod common;
pub mod library_a_star;
