pub mod panels;
pub mod views;
