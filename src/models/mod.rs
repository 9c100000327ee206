mod category;
mod expense;

pub use category::Category;
pub use expense::{CategoryRef, Expense};

#[cfg(test)]
mod tests;
