pub(crate) mod abi;
pub(crate) mod layout;
pub(crate) mod variables;
