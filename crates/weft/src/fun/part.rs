use crate::fun::NetFunction;
use crate::netlist::{NetPtr, Netlist};
use crate::vector::Vector4;

/// Emits a fixed part select of the vector arriving on port 0.
///
/// The result is always exactly `wid` bits: source positions past the end of
/// the delivered vector read as `x` rather than faulting, so a select that
/// hangs off the end of a narrow source is well defined.
pub struct FunPart {
    base: usize,
    wid: usize,
}

impl FunPart {
    pub fn new(base: usize, wid: usize) -> FunPart {
        assert!(wid > 0, "zero width part select");
        FunPart { base, wid }
    }
}

impl NetFunction for FunPart {
    fn recv_vec4(&self, netlist: &Netlist, ptr: NetPtr, bit: Vector4) {
        if ptr.port() != 0 {
            return;
        }
        let mut out = Vector4::new(self.wid);
        for idx in 0..self.wid {
            let src = self.base + idx;
            if src < bit.size() {
                out.set_bit(idx, bit.value(src));
            }
        }
        netlist.send_vec4(netlist.net(ptr.net()).out(), out);
    }
}
