use crate::fun::NetFunction;
use crate::logic::Bit4;
use crate::netlist::{NetPtr, Netlist};
use crate::vector::Vector4;
use std::cell::{Cell, RefCell};

/// The value holder for a named signal (wire or reg).
///
/// Port 0 carries the ordinary data source: netlist drivers for a wire,
/// behavioral writes for a reg. Port 1 carries continuous assignments; the
/// first write there switches the signal into continuous-assign mode, and
/// while that mode is active port 0 writes are silently dropped.
/// [`FunSignal::deassign`] switches back without touching the stored value.
///
/// Behavioral code and introspection read the last accepted value through
/// [`FunSignal::size`] / [`FunSignal::value`], and may register observers
/// that run synchronously whenever an accepted write changes the value. The
/// stored state is fully updated before observers run, so an observer that
/// itself writes back into the signal sees and leaves consistent state.
pub struct FunSignal {
    wid: usize,
    bits: RefCell<Vector4>,
    continuous_assign: Cell<bool>,
    observers: RefCell<Vec<Box<dyn Fn(&Vector4)>>>,
}

impl FunSignal {
    /// A signal of `wid` bits, initially all `x`.
    pub fn new(wid: usize) -> FunSignal {
        FunSignal {
            wid,
            bits: RefCell::new(Vector4::new(wid)),
            continuous_assign: Cell::new(false),
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn size(&self) -> usize {
        self.wid
    }

    /// The stored bit at `idx`.
    pub fn value(&self, idx: usize) -> Bit4 {
        self.bits.borrow().value(idx)
    }

    /// Leave continuous-assign mode. Port 0 writes take effect again; the
    /// stored value is unchanged until the next accepted write.
    pub fn deassign(&self) {
        self.continuous_assign.set(false);
    }

    /// Register an observer for accepted writes that change the value.
    /// Observers run synchronously, inside the write that triggered them.
    pub fn observe(&self, observer: impl Fn(&Vector4) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    fn write(&self, ptr: NetPtr, bit: Vector4) {
        match ptr.port() {
            0 => {
                if !self.continuous_assign.get() {
                    self.store(bit);
                }
            }
            1 => {
                self.continuous_assign.set(true);
                self.store(bit);
            }
            _ => {}
        }
    }

    fn store(&self, bit: Vector4) {
        // Coerce to the declared width; missing source bits read as x.
        let mut coerced = Vector4::new(self.wid);
        for idx in 0..self.wid.min(bit.size()) {
            coerced.set_bit(idx, bit.value(idx));
        }

        let changed = {
            let mut bits = self.bits.borrow_mut();
            if *bits == coerced {
                false
            } else {
                *bits = coerced.clone();
                true
            }
        };
        // No bits borrow is held here: an observer may read, write or
        // deassign this very signal.
        if changed {
            for observer in self.observers.borrow().iter() {
                observer(&coerced);
            }
        }
    }
}

impl NetFunction for FunSignal {
    fn recv_vec4(&self, _netlist: &Netlist, ptr: NetPtr, bit: Vector4) {
        self.write(ptr, bit);
    }

    fn recv_long(&self, _netlist: &Netlist, ptr: NetPtr, bit: i64) {
        // Behavioral integer write: widen to the signal width as two-state
        // bits, then go through the normal port state machine.
        let mut vec = Vector4::new(self.wid);
        for idx in 0..self.wid {
            let bitval = if idx < 64 { (bit >> idx) & 1 } else { 0 };
            vec.set_bit(idx, if bitval != 0 { Bit4::B1 } else { Bit4::B0 });
        }
        self.write(ptr, vec);
    }
}
