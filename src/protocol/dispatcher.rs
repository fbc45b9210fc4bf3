use crate::core::types::MessageType;
use crate::protocol::request::{Request, Responser};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::trace;

/// Application logic for one or more message types.
pub trait Handler: Send + Sync {
    fn serve_dhcp(&self, w: &mut dyn Responser, r: &Request);
}

/// Adapter that lets a plain function or closure act as a [`Handler`].
pub struct HandlerFunc<F>(pub F);

impl<F> Handler for HandlerFunc<F>
where
    F: Fn(&mut dyn Responser, &Request) + Send + Sync,
{
    fn serve_dhcp(&self, w: &mut dyn Responser, r: &Request) {
        (self.0)(w, r)
    }
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve_dhcp(&self, w: &mut dyn Responser, r: &Request) {
        (**self).serve_dhcp(w, r)
    }
}

/// Message-type keyed request multiplexer.
///
/// At most one handler is registered per message type; a later registration
/// replaces the earlier one. Registration may happen while requests are
/// being dispatched. The registry sits behind a read/write lock and the
/// handler runs after the read guard is released, so a handler can itself
/// register handlers.
///
/// A request whose message type has no handler is dropped: the responser is
/// left untouched, which means no reply is sent.
pub struct ServeMux {
    handlers: RwLock<HashMap<MessageType, Arc<dyn Handler>>>,
}

impl Default for ServeMux {
    fn default() -> Self {
        Self::new()
    }
}

impl ServeMux {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register `handler` for `message_type`, replacing any previous one.
    pub fn handle<H>(&self, message_type: MessageType, handler: H)
    where
        H: Handler + 'static,
    {
        // A panic while holding the guard can't leave the map half-written,
        // so a poisoned lock is safe to reuse.
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        handlers.insert(message_type, Arc::new(handler));
    }

    /// Register a function as the handler for `message_type`.
    pub fn handle_func<F>(&self, message_type: MessageType, f: F)
    where
        F: Fn(&mut dyn Responser, &Request) + Send + Sync + 'static,
    {
        self.handle(message_type, HandlerFunc(f));
    }

    pub fn is_registered(&self, message_type: MessageType) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&message_type)
    }

    fn lookup(&self, message_type: MessageType) -> Option<Arc<dyn Handler>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&message_type)
            .cloned()
    }
}

impl Handler for ServeMux {
    fn serve_dhcp(&self, w: &mut dyn Responser, r: &Request) {
        match self.lookup(r.message_type()) {
            Some(handler) => handler.serve_dhcp(w, r),
            None => trace!(
                message_type = %r.message_type(),
                transaction_id = %r.transaction_id(),
                "No handler registered, dropping request"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::core::packet::Packet;
    use crate::core::types::OptionCode;
    use crate::protocol::request::Response;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(message_type: MessageType) -> Request {
        let packet = Packet::new(message_type, &[0, 1, 2], None).unwrap();
        Request::parse(packet, None)
    }

    fn dispatch(mux: &ServeMux, r: &Request) -> Response {
        let mut w = Response::new(r.transaction_id());
        mux.serve_dhcp(&mut w, r);
        w
    }

    struct SolicitHandler;

    impl Handler for SolicitHandler {
        fn serve_dhcp(&self, w: &mut dyn Responser, r: &Request) {
            solicit(w, r);
        }
    }

    fn solicit(w: &mut dyn Responser, _r: &Request) {
        w.send(MessageType::ADVERTISE);
    }

    #[test]
    fn test_no_handler_leaves_response_unset() {
        let mux = ServeMux::new();
        let w = dispatch(&mux, &request(MessageType::SOLICIT));

        assert_eq!(w.message_type(), None);
        assert_eq!(w.reply_options().len(), 0);
        assert!(w.into_packet().is_none());
    }

    #[test]
    fn test_handle_ok() {
        let mux = ServeMux::new();
        mux.handle(MessageType::SOLICIT, SolicitHandler);

        let w = dispatch(&mux, &request(MessageType::SOLICIT));
        assert_eq!(w.message_type(), Some(MessageType::ADVERTISE));
        assert_eq!(w.message_type().unwrap().0, 2);
    }

    #[test]
    fn test_handle_func_ok() {
        let mux = ServeMux::new();
        mux.handle_func(MessageType::SOLICIT, solicit);

        let w = dispatch(&mux, &request(MessageType::SOLICIT));
        assert_eq!(w.message_type(), Some(MessageType::ADVERTISE));
    }

    #[test]
    fn test_other_types_not_routed() {
        let mux = ServeMux::new();
        mux.handle(MessageType::SOLICIT, SolicitHandler);

        let w = dispatch(&mux, &request(MessageType::DECLINE));
        assert!(!w.has_reply());
    }

    #[test]
    fn test_last_registration_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mux = ServeMux::new();

        let counter = first.clone();
        mux.handle_func(MessageType::REQUEST, move |w, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            w.send(MessageType::ADVERTISE);
        });
        let counter = second.clone();
        mux.handle_func(MessageType::REQUEST, move |w, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            w.send(MessageType::REPLY);
        });

        let w = dispatch(&mux, &request(MessageType::REQUEST));
        assert_eq!(w.message_type(), Some(MessageType::REPLY));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_sees_request_and_sets_options() {
        let mux = ServeMux::new();
        mux.handle_func(MessageType::INFORMATION_REQUEST, |w, r| {
            if let Some(client_id) = r.options().client_id() {
                w.options().add(OptionCode::CLIENT_ID, client_id.clone());
            }
            w.options().add(OptionCode::SERVER_ID, vec![0, 3, 0, 1]);
            w.send(MessageType::REPLY);
        });

        let mut options = crate::core::options::Options::new();
        options.add(OptionCode::CLIENT_ID, vec![0xC1]);
        let packet =
            Packet::new(MessageType::INFORMATION_REQUEST, &[7, 7, 7], Some(options)).unwrap();
        let r = Request::parse(packet, None);

        let reply = dispatch(&mux, &r).into_packet().unwrap();
        assert_eq!(reply.transaction_id, r.transaction_id());
        assert_eq!(reply.options.client_id().unwrap().as_ref(), &[0xC1]);
        assert!(reply.options.has(OptionCode::SERVER_ID));
    }

    #[test]
    fn test_handler_may_register_during_dispatch() {
        let mux = Arc::new(ServeMux::new());
        let inner = mux.clone();
        mux.handle_func(MessageType::SOLICIT, move |w, _| {
            inner.handle_func(MessageType::REQUEST, |w, _| w.send(MessageType::REPLY));
            w.send(MessageType::ADVERTISE);
        });

        let w = dispatch(&mux, &request(MessageType::SOLICIT));
        assert_eq!(w.message_type(), Some(MessageType::ADVERTISE));
        assert!(mux.is_registered(MessageType::REQUEST));
    }

    #[test]
    fn test_arc_handler() {
        let mux = ServeMux::new();
        let shared: Arc<dyn Handler> = Arc::new(SolicitHandler);
        mux.handle(MessageType::SOLICIT, shared.clone());
        mux.handle(MessageType::CONFIRM, shared);

        let w = dispatch(&mux, &request(MessageType::CONFIRM));
        assert_eq!(w.message_type(), Some(MessageType::ADVERTISE));
    }
}
