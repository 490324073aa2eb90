pub mod charts;
pub mod panels;
pub mod posters;
pub mod table;
