pub mod box_provider;
pub mod gateway;
pub mod provider;

#[cfg(test)]
pub(crate) mod mock;
