mod fun;
mod logic;
mod netlist;
mod vector;

pub(crate) use fxhash::FxHashMap as HashMap;

pub use fun::{DRIVE_FIXED, FunConcat, FunDrive, FunPart, FunSignal, NetFunction};
pub use logic::{Bit4, Scaler, add_with_carry, resolve, strength};
pub use netlist::{Net, NetPtr, NetRef, Netlist, NetlistError, PORT_COUNT};
pub use vector::{Vector4, Vector8};
