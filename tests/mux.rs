//! Request routing through `ServeMux`, using only the public API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use dhcp6::{Handler, MessageType, Packet, Request, Response, Responser, ServeMux};

// Replies to a Solicit with an Advertise
struct SolicitHandler;

impl Handler for SolicitHandler {
    fn serve_dhcp(&self, w: &mut dyn Responser, r: &Request) {
        solicit(w, r);
    }
}

fn solicit(w: &mut dyn Responser, _r: &Request) {
    w.send(MessageType::ADVERTISE);
}

fn solicit_request() -> Request {
    let p = Packet::new(MessageType::SOLICIT, &[0, 1, 2], None).unwrap();
    Request::parse(p, None)
}

#[test]
fn test_serve_mux_handle_no_response() {
    let mux = ServeMux::new();

    let r = solicit_request();
    let mut w = Response::new(r.transaction_id());
    mux.serve_dhcp(&mut w, &r);

    assert!(w.message_type().is_none(), "no reply type should be declared");
    assert_eq!(w.reply_options().len(), 0);
    assert!(w.into_packet().is_none(), "nothing should be transmitted");
}

#[test]
fn test_serve_mux_handle_ok() {
    let mux = ServeMux::new();
    mux.handle(MessageType::SOLICIT, SolicitHandler);

    let r = solicit_request();
    let mut w = Response::new(r.transaction_id());
    mux.serve_dhcp(&mut w, &r);

    assert_eq!(w.message_type(), Some(MessageType::ADVERTISE));
    assert_eq!(w.message_type(), Some(MessageType(2)));
}

#[test]
fn test_serve_mux_handle_func_ok() {
    let mux = ServeMux::new();
    mux.handle_func(MessageType::SOLICIT, solicit);

    let r = solicit_request();
    let mut w = Response::new(r.transaction_id());
    mux.serve_dhcp(&mut w, &r);

    assert_eq!(w.message_type(), Some(MessageType::ADVERTISE));
}

#[test]
fn test_reply_echoes_transaction_id() {
    let mux = ServeMux::new();
    mux.handle_func(MessageType::SOLICIT, solicit);

    let r = solicit_request();
    let mut w = Response::new(r.transaction_id());
    mux.serve_dhcp(&mut w, &r);

    let reply = w.into_packet().expect("reply declared");
    assert_eq!(reply.encode().unwrap().as_ref(), &[0x02, 0x00, 0x01, 0x02]);
}

#[test]
fn test_mux_is_a_handler() {
    // A mux can be nested behind another handler
    let inner = ServeMux::new();
    inner.handle_func(MessageType::SOLICIT, solicit);
    let outer = ServeMux::new();
    outer.handle(MessageType::SOLICIT, inner);

    let r = solicit_request();
    let mut w = Response::new(r.transaction_id());
    outer.serve_dhcp(&mut w, &r);
    assert_eq!(w.message_type(), Some(MessageType::ADVERTISE));
}
