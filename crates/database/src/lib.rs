pub mod catalog;
pub mod db;
pub mod directory;
pub mod entities;
pub mod error;
pub mod services;
