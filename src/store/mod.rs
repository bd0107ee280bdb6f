pub mod db;
pub mod writer;
