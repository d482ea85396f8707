pub mod boundary;
pub mod export;
pub mod interval_set;
pub mod invariants;
pub mod layout;
pub mod neighborhood;
#[cfg(test)]
pub(crate) mod test_support;
pub mod timing;
