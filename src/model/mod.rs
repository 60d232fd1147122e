pub mod reference;
pub mod source_record;
pub mod ticket;
