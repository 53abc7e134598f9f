pub mod hair_swap;
pub mod pages;
