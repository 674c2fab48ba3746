pub mod annotate;
pub mod dispatch;
pub mod enzymes;
pub mod health;
pub mod metabolites;
pub mod schema;
pub mod search;
pub mod shared;
pub mod tables;
