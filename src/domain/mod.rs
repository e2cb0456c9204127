pub mod arithmetic;
pub mod grammar;
pub mod models;
pub mod range_list;
pub mod selection;
pub mod snapper;
