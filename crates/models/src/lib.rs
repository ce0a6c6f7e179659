pub mod errors;
pub mod db;
pub mod user;
pub mod product;
pub mod order;
pub mod slot;

#[cfg(test)]
mod tests;
