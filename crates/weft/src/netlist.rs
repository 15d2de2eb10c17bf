mod error;

pub use error::NetlistError;

use crate::fun::NetFunction;
use crate::vector::{Vector4, Vector8};
use std::fmt;
use std::rc::Rc;

/// Fan-in of a net. Every net has exactly this many input ports.
pub const PORT_COUNT: usize = 4;

/// Arena handle for a [`Net`] inside a [`Netlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetRef(u32);

impl NetRef {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Points at one input port (0..=3) of a net, or nowhere.
///
/// The original encoding packed a node address and the port into one aligned
/// machine word; here it is an explicit (handle, port) pair with a nil state.
/// Nil pointers are legal chain terminals and must never be dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetPtr {
    target: Option<(NetRef, u8)>,
}

impl NetPtr {
    /// Point at port `port` of `net`. A port outside 0..=3 is a malformed
    /// netlist and panics.
    pub fn new(net: NetRef, port: usize) -> NetPtr {
        assert!(port < PORT_COUNT, "net port out of range: {port}");
        NetPtr { target: Some((net, port as u8)) }
    }

    /// The nil pointer. Same as `NetPtr::default()`.
    pub fn nil() -> NetPtr {
        NetPtr { target: None }
    }

    pub fn is_nil(&self) -> bool {
        self.target.is_none()
    }

    /// The referenced net. Panics on nil.
    pub fn net(&self) -> NetRef {
        self.expect().0
    }

    /// The referenced port number. Panics on nil.
    pub fn port(&self) -> usize {
        self.expect().1 as usize
    }

    fn expect(&self) -> (NetRef, u8) {
        match self.target {
            Some(target) => target,
            None => panic!("nil NetPtr dereferenced"),
        }
    }
}

impl fmt::Display for NetPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some((net, port)) => write!(f, "net{}.{}", net.0, port),
            None => write!(f, "nil"),
        }
    }
}

/// A netlist node: four input ports, one output edge, and the function that
/// reacts to values delivered here.
///
/// The output edge names the first destination of this net's value. Further
/// destinations are chained through the port slots of the destinations
/// themselves: the slot at the delivered port index holds the pointer to the
/// next destination (never a value; values go straight to the function).
/// Fan-in is therefore bounded at four while fan-out is unbounded with no
/// per-edge allocation.
pub struct Net {
    pub(crate) port: [NetPtr; PORT_COUNT],
    pub(crate) out: NetPtr,
    pub(crate) fun: Rc<dyn NetFunction>,
    flags: u32,
    // Ports already claimed as a link destination. A terminal destination
    // has a nil port slot, so the slot alone cannot tell "free" from
    // "end of chain".
    dest_mask: u8,
}

impl Net {
    /// The continuation slot for values arriving at `port`, nil at the end
    /// of a chain.
    pub fn port(&self, port: usize) -> NetPtr {
        self.port[port]
    }

    /// First destination of this net's output, nil if unconnected.
    pub fn out(&self) -> NetPtr {
        self.out
    }

    /// Opaque per-instance configuration word, interpreted by the attached
    /// function.
    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn fun(&self) -> &Rc<dyn NetFunction> {
        &self.fun
    }
}

/// The arena owning every net of one simulated design.
///
/// Build-time mutation only: `add_net`, `link`, `set_flags` and the label
/// registry run while the loader constructs the design. Once values start
/// flowing, the wiring is static and the `send_*` walks take `&self`;
/// per-function state lives behind interior mutability inside the functions
/// themselves, which is what makes feedback re-entry legal.
#[derive(Default)]
pub struct Netlist {
    nets: Vec<Net>,
    labels: crate::HashMap<String, NetRef>,
}

impl Netlist {
    pub fn new() -> Netlist {
        Netlist::default()
    }

    /// Add a node driven by `fun`. The function is shared with the caller,
    /// which typically keeps a clone to read signal state back out.
    pub fn add_net(&mut self, fun: Rc<dyn NetFunction>) -> NetRef {
        let net = NetRef(u32::try_from(self.nets.len()).expect("netlist arena exhausted"));
        self.nets.push(Net {
            port: [NetPtr::nil(); PORT_COUNT],
            out: NetPtr::nil(),
            fun,
            flags: 0,
            dest_mask: 0,
        });
        log::trace!("add net{}", net.0);
        net
    }

    pub fn net(&self, net: NetRef) -> &Net {
        &self.nets[net.index()]
    }

    /// Number of nets in the arena.
    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    /// Wire the output of `src` to `dst`, extending the fan-out chain.
    ///
    /// The new destination becomes the head of the chain: the previous head
    /// (if any) moves into `dst`'s own port slot as the continuation. Each
    /// (net, port) pair can be the destination of at most one link.
    pub fn link(&mut self, src: NetRef, dst: NetPtr) -> Result<(), NetlistError> {
        assert!(!dst.is_nil(), "cannot link to the nil pointer");
        let (dnet, dport) = (dst.net(), dst.port());

        let dest = &mut self.nets[dnet.index()];
        if dest.dest_mask & (1 << dport) != 0 {
            return Err(NetlistError::PortInUse { net: dnet.0, port: dport });
        }
        dest.dest_mask |= 1 << dport;

        let head = self.nets[src.index()].out;
        self.nets[dnet.index()].port[dport] = head;
        self.nets[src.index()].out = dst;
        log::trace!("link net{} -> {dst}", src.0);
        Ok(())
    }

    /// Set the opaque configuration word of `net`. Build-time only.
    pub fn set_flags(&mut self, net: NetRef, flags: u32) {
        self.nets[net.index()].flags = flags;
    }

    /// Register a loader label for `net`.
    pub fn set_label(&mut self, label: &str, net: NetRef) -> Result<(), NetlistError> {
        if self.labels.contains_key(label) {
            return Err(NetlistError::DuplicateLabel(label.to_owned()));
        }
        log::debug!("label {label} = net{}", net.0);
        self.labels.insert(label.to_owned(), net);
        Ok(())
    }

    pub fn lookup(&self, label: &str) -> Option<NetRef> {
        self.labels.get(label).copied()
    }

    /// Deliver a four-state vector to `dst` and every further destination on
    /// its fan-out chain.
    ///
    /// A nil `dst` is a no-op. At each hop the destination function's
    /// `recv_vec4` runs *before* the walk continues down the chain, so a
    /// function that re-emits from inside its own `recv_*` never observes a
    /// partially delivered fan-out ahead of it. Delivery is synchronous and
    /// depth-first; recursion depth is bounded only by the wiring.
    pub fn send_vec4(&self, dst: NetPtr, bit: Vector4) {
        let mut ptr = dst;
        while let Some((net, port)) = ptr.target {
            let net = &self.nets[net.index()];
            let next = net.port[port as usize];
            if next.is_nil() {
                net.fun.recv_vec4(self, ptr, bit);
                return;
            }
            // Each hop gets its own copy; the receiver is free to keep it.
            net.fun.recv_vec4(self, ptr, bit.clone());
            ptr = next;
        }
    }

    /// Deliver a strength-carrying vector along the fan-out chain. Same
    /// contract as [`Netlist::send_vec4`].
    pub fn send_vec8(&self, dst: NetPtr, bit: Vector8) {
        let mut ptr = dst;
        while let Some((net, port)) = ptr.target {
            let net = &self.nets[net.index()];
            let next = net.port[port as usize];
            if next.is_nil() {
                net.fun.recv_vec8(self, ptr, bit);
                return;
            }
            net.fun.recv_vec8(self, ptr, bit.clone());
            ptr = next;
        }
    }

    /// Deliver a real value along the fan-out chain. Same contract as
    /// [`Netlist::send_vec4`].
    pub fn send_real(&self, dst: NetPtr, bit: f64) {
        let mut ptr = dst;
        while let Some((net, port)) = ptr.target {
            let net = &self.nets[net.index()];
            let next = net.port[port as usize];
            net.fun.recv_real(self, ptr, bit);
            ptr = next;
        }
    }

    /// Deliver an integer value along the fan-out chain. Same contract as
    /// [`Netlist::send_vec4`].
    pub fn send_long(&self, dst: NetPtr, bit: i64) {
        let mut ptr = dst;
        while let Some((net, port)) = ptr.target {
            let net = &self.nets[net.index()];
            let next = net.port[port as usize];
            net.fun.recv_long(self, ptr, bit);
            ptr = next;
        }
    }
}
