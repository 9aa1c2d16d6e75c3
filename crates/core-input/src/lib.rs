//! Input decoding: raw terminal bytes to semantic key events.

mod decoder;
pub use decoder::InputDecoder;

use core_events::KeyEvent;

#[inline]
pub(crate) fn log_key(key: &KeyEvent) {
    tracing::trace!(target: "input", kind = key.kind(), "key_decoded");
}

#[cfg(test)]
mod tests {

    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::Subscriber;
    use tracing::dispatcher::Dispatch;
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::registry::Registry;

    #[derive(Clone, Default)]
    struct Capture {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    #[derive(Clone, Debug)]
    struct CapturedEvent {
        target: String,
        fields: Vec<(String, String)>,
    }

    #[derive(Default)]
    struct FieldCollector {
        fields: Vec<(String, String)>,
    }

    impl Visit for FieldCollector {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }

    impl<S> Layer<S> for Capture
    where
        S: Subscriber,
    {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut collector = FieldCollector::default();
            event.record(&mut collector);
            let meta = event.metadata();
            self.events.lock().unwrap().push(CapturedEvent {
                target: meta.target().to_string(),
                fields: collector.fields,
            });
        }
    }

    #[test]
    fn key_log_omits_typed_byte() {
        let capture = Capture::default();
        let events = capture.events.clone();
        let subscriber = Registry::default().with(capture);
        let dispatch = Dispatch::new(subscriber);

        tracing::dispatcher::with_default(&dispatch, || {
            super::log_key(&core_events::KeyEvent::Printable(b'Z'));
        });

        let events = events.lock().unwrap();
        let event = events
            .iter()
            .find(|e| e.target == "input")
            .expect("missing input event");
        assert!(
            event
                .fields
                .iter()
                .any(|(name, value)| name == "kind" && value.contains("printable")),
            "kind field missing from event"
        );
        for (_, value) in &event.fields {
            assert!(!value.contains('Z'), "event leaked typed byte: {value}");
        }
    }
}
