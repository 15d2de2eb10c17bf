use crate::fun::NetFunction;
use crate::netlist::{NetPtr, Netlist, PORT_COUNT};
use crate::vector::Vector4;
use std::cell::RefCell;

/// Concatenates up to four inputs into one vector.
///
/// Port 0 supplies the least significant chunk and port 3 the most
/// significant; that ordering is a property of the wiring, not of arrival
/// order. Ports that have never received a value contribute nothing. Every
/// delivery recomputes the whole concatenation from the current port values
/// and re-emits it, so no stale result can survive an input change.
#[derive(Default)]
pub struct FunConcat {
    vals: RefCell<[Option<Vector4>; PORT_COUNT]>,
}

impl FunConcat {
    pub fn new() -> FunConcat {
        FunConcat::default()
    }
}

impl NetFunction for FunConcat {
    fn recv_vec4(&self, netlist: &Netlist, ptr: NetPtr, bit: Vector4) {
        self.vals.borrow_mut()[ptr.port()] = Some(bit);

        // Borrow dropped before re-emitting; the walk may feed back here.
        let out = {
            let vals = self.vals.borrow();
            let total = vals.iter().flatten().map(Vector4::size).sum();
            let mut out = Vector4::new(total);
            let mut off = 0;
            for val in vals.iter().flatten() {
                for idx in 0..val.size() {
                    out.set_bit(off + idx, val.value(idx));
                }
                off += val.size();
            }
            out
        };
        netlist.send_vec4(netlist.net(ptr.net()).out(), out);
    }
}
