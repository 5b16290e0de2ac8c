pub mod licensing;
