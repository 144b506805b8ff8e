pub mod a001_product;
pub mod a002_purchase;
pub mod a003_sale;
pub mod a004_expense;
pub mod common;
