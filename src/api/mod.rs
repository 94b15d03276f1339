pub mod department;
pub mod health;
pub mod overview;
