pub mod document;
pub mod filter;
pub mod group;
pub mod project;
pub mod resolve;
pub mod settings;
pub mod sort;
