mod concat;
mod drive;
mod part;
mod signal;

pub use concat::FunConcat;
pub use drive::{DRIVE_FIXED, FunDrive};
pub use part::FunPart;
pub use signal::FunSignal;

use crate::netlist::{NetPtr, Netlist};
use crate::vector::{Vector4, Vector8};

/// The behavior attached to a net.
///
/// Whenever a value reaches a net, the matching `recv_*` method runs with
/// the pointer that was delivered to; `ptr.port()` tells the function which
/// of its four inputs received the value, and `ptr.net()` is its own node,
/// through which it can reach its output edge to re-emit. The default bodies
/// ignore the value, so a function only implements the kinds it accepts.
///
/// Methods take `&self`: a function keeps its computation state behind
/// interior mutability so that feedback wiring may re-enter it from inside
/// its own call stack. Delivered vectors are owned copies; keeping one
/// beyond the call is fine.
pub trait NetFunction {
    fn recv_vec4(&self, netlist: &Netlist, ptr: NetPtr, bit: Vector4) {
        let _ = (netlist, ptr, bit);
    }

    fn recv_vec8(&self, netlist: &Netlist, ptr: NetPtr, bit: Vector8) {
        let _ = (netlist, ptr, bit);
    }

    fn recv_real(&self, netlist: &Netlist, ptr: NetPtr, bit: f64) {
        let _ = (netlist, ptr, bit);
    }

    fn recv_long(&self, netlist: &Netlist, ptr: NetPtr, bit: i64) {
        let _ = (netlist, ptr, bit);
    }
}
