pub mod catalog;
pub mod comparison;
pub mod filters;
pub mod providers;
pub mod recommendations;
