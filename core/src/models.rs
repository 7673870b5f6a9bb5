pub mod input;
pub mod table_info;
pub mod table_size_info;
