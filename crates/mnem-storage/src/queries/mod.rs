pub mod compiler;
pub mod record_crud;
