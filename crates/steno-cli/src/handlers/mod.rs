pub mod chunk;
pub mod convert;
pub mod fetch;
pub mod init;
pub mod pipeline;
