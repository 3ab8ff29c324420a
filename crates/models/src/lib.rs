pub mod errors;
pub mod db;
pub mod favorite;
pub mod rating;
