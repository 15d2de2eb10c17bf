use std::cell::Cell;
use std::rc::Rc;

use weft::{Bit4, FunSignal, NetPtr, NetRef, Netlist, Vector4};

fn signal_net(netlist: &mut Netlist, wid: usize) -> (NetRef, Rc<FunSignal>) {
    let sig = Rc::new(FunSignal::new(wid));
    let net = netlist.add_net(sig.clone());
    (net, sig)
}

fn bits(pattern: &[u8]) -> Vector4 {
    let bits: Vec<Bit4> = pattern
        .iter()
        .map(|b| if *b != 0 { Bit4::B1 } else { Bit4::B0 })
        .collect();
    Vector4::from_bits(&bits)
}

#[test]
fn starts_all_x() {
    let sig = FunSignal::new(3);
    assert_eq!(sig.size(), 3);
    for idx in 0..3 {
        assert_eq!(sig.value(idx), Bit4::BX);
    }
}

#[test]
fn port0_write_updates_and_notifies_once() {
    let mut netlist = Netlist::new();
    let (net, sig) = signal_net(&mut netlist, 2);

    let notified = Rc::new(Cell::new(0));
    let count = notified.clone();
    sig.observe(move |_| count.set(count.get() + 1));

    netlist.send_vec4(NetPtr::new(net, 0), bits(&[1, 0]));
    assert_eq!(sig.value(0), Bit4::B1);
    assert_eq!(sig.value(1), Bit4::B0);
    assert_eq!(notified.get(), 1);

    // Writing the same value again is not a change.
    netlist.send_vec4(NetPtr::new(net, 0), bits(&[1, 0]));
    assert_eq!(notified.get(), 1);
}

#[test]
fn continuous_assign_overrides_port0() {
    let mut netlist = Netlist::new();
    let (net, sig) = signal_net(&mut netlist, 1);

    netlist.send_vec4(NetPtr::new(net, 0), bits(&[0]));
    assert_eq!(sig.value(0), Bit4::B0);

    // Port 1 takes over.
    netlist.send_vec4(NetPtr::new(net, 1), bits(&[1]));
    assert_eq!(sig.value(0), Bit4::B1);

    // Procedural writes are dropped while assigned.
    netlist.send_vec4(NetPtr::new(net, 0), bits(&[0]));
    assert_eq!(sig.value(0), Bit4::B1);

    // Deassign alone does not touch the value.
    sig.deassign();
    assert_eq!(sig.value(0), Bit4::B1);

    // Port 0 works again afterwards.
    netlist.send_vec4(NetPtr::new(net, 0), bits(&[0]));
    assert_eq!(sig.value(0), Bit4::B0);
}

#[test]
fn dropped_write_does_not_notify() {
    let mut netlist = Netlist::new();
    let (net, sig) = signal_net(&mut netlist, 1);

    let notified = Rc::new(Cell::new(0));
    let count = notified.clone();
    sig.observe(move |_| count.set(count.get() + 1));

    netlist.send_vec4(NetPtr::new(net, 1), bits(&[1]));
    assert_eq!(notified.get(), 1);

    netlist.send_vec4(NetPtr::new(net, 0), bits(&[0]));
    assert_eq!(notified.get(), 1);
}

#[test]
fn observer_may_write_back() {
    let mut netlist = Netlist::new();
    let sig = Rc::new(FunSignal::new(1));
    let net = netlist.add_net(sig.clone());

    // An observer that deasserts continuous-assign mode as soon as it sees
    // a value; a later procedural write must then land.
    let inner = sig.clone();
    sig.observe(move |_| inner.deassign());

    netlist.send_vec4(NetPtr::new(net, 1), bits(&[1]));
    netlist.send_vec4(NetPtr::new(net, 0), bits(&[0]));
    assert_eq!(sig.value(0), Bit4::B0);
}

#[test]
fn long_write_converts_to_bits() {
    let mut netlist = Netlist::new();
    let (net, sig) = signal_net(&mut netlist, 4);

    netlist.send_long(NetPtr::new(net, 0), 0b0101);
    assert_eq!(sig.value(0), Bit4::B1);
    assert_eq!(sig.value(1), Bit4::B0);
    assert_eq!(sig.value(2), Bit4::B1);
    assert_eq!(sig.value(3), Bit4::B0);
}

#[test]
fn narrow_write_pads_with_x() {
    let mut netlist = Netlist::new();
    let (net, sig) = signal_net(&mut netlist, 4);

    netlist.send_vec4(NetPtr::new(net, 0), bits(&[1, 1]));
    assert_eq!(sig.value(0), Bit4::B1);
    assert_eq!(sig.value(1), Bit4::B1);
    assert_eq!(sig.value(2), Bit4::BX);
    assert_eq!(sig.value(3), Bit4::BX);
}
