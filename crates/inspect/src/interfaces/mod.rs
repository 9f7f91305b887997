mod args;
mod storage;

// re-export the public interface
pub use args::{InspectArgs, InspectArgsBuilder, SlotsArgs, SlotsArgsBuilder};
pub use storage::{AbiSource, ContractStorage, SlotReadout, SlotViewEntry, VariableEntry};
