use crate::fun::NetFunction;
use crate::logic::{Bit4, Scaler, strength};
use crate::netlist::{NetPtr, Netlist};
use crate::vector::{Vector4, Vector8};
use std::cell::{Cell, RefCell};

/// Net flag bit: ignore strength adjustments arriving over the network and
/// keep the construction-time defaults.
pub const DRIVE_FIXED: u32 = 1;

/// Turns a four-state vector into a strength-carrying one.
///
/// Port 0 is the value to drive. Ports 1 and 2 accept integers 0..=7 that
/// adjust the drive-low and drive-high strengths at runtime, unless the
/// net's [`DRIVE_FIXED`] flag pins the defaults. Each `1` bit is emitted at
/// the drive-high strength, each `0` at the drive-low strength, and `x`/`z`
/// pass through at high impedance; an undefined value is never given a
/// strength. This function only ever emits vec8.
pub struct FunDrive {
    val: RefCell<Vector4>,
    str0: Cell<u8>,
    str1: Cell<u8>,
}

impl FunDrive {
    /// A driver initialized to the single bit `init` with the given default
    /// strengths (0..=7).
    pub fn new(init: Bit4, str0: u8, str1: u8) -> FunDrive {
        assert!(str0 <= strength::SUPPLY, "drive strength out of range: {str0}");
        assert!(str1 <= strength::SUPPLY, "drive strength out of range: {str1}");
        FunDrive {
            val: RefCell::new(Vector4::from_bits(&[init])),
            str0: Cell::new(str0),
            str1: Cell::new(str1),
        }
    }

    fn emit(&self, netlist: &Netlist, ptr: NetPtr) {
        let out = {
            let val = self.val.borrow();
            let mut out = Vector8::new(val.size());
            for idx in 0..val.size() {
                let scaler = match val.value(idx) {
                    Bit4::B0 => Scaler::new(Bit4::B0, self.str0.get()),
                    Bit4::B1 => Scaler::new(Bit4::B1, self.str1.get()),
                    bit => Scaler::new(bit, strength::HIZ),
                };
                out.set_bit(idx, scaler);
            }
            out
        };
        netlist.send_vec8(netlist.net(ptr.net()).out(), out);
    }
}

impl Default for FunDrive {
    fn default() -> Self {
        FunDrive::new(Bit4::BX, strength::STRONG, strength::STRONG)
    }
}

impl NetFunction for FunDrive {
    fn recv_vec4(&self, netlist: &Netlist, ptr: NetPtr, bit: Vector4) {
        if ptr.port() != 0 {
            return;
        }
        *self.val.borrow_mut() = bit;
        self.emit(netlist, ptr);
    }

    fn recv_long(&self, netlist: &Netlist, ptr: NetPtr, bit: i64) {
        if netlist.net(ptr.net()).flags() & DRIVE_FIXED != 0 {
            return;
        }
        let level = bit.clamp(strength::HIZ as i64, strength::SUPPLY as i64) as u8;
        match ptr.port() {
            1 => self.str0.set(level),
            2 => self.str1.set(level),
            _ => return,
        }
        self.emit(netlist, ptr);
    }
}
