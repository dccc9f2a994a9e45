pub mod codec;
pub mod repository;

#[cfg(test)]
pub(crate) mod memory;
