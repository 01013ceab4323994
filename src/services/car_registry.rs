//! Live connection registry
//!
//! Maps a car code to the outbound queues of every WebSocket currently
//! watching that car. One mutex guards the whole map; it is only held while
//! the map is touched or messages are pushed onto the queues, never across an
//! await or a store call.

use axum::extract::ws::Message;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

/// Snapshots a connection may have queued before it counts as stalled
pub const CONNECTION_QUEUE_CAPACITY: usize = 64;

/// Sender half of a connection's outbound queue. The connection's writer task
/// owns the receiver and forwards everything to the socket.
pub type ConnectionSender = mpsc::Sender<Message>;

/// Outbound queue for one connection, sized for the registry
pub fn connection_queue() -> (ConnectionSender, mpsc::Receiver<Message>) {
    mpsc::channel(CONNECTION_QUEUE_CAPACITY)
}

#[derive(Default)]
pub struct CarRegistry {
    cars: Mutex<HashMap<String, Vec<ConnectionSender>>>,
}

impl CarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a connection to a car. The same connection may be registered
    /// more than once; each registration needs its own `unregister`.
    pub fn register(&self, id_car: &str, connection: ConnectionSender) {
        let mut cars = self.cars.lock();
        let subscribers = cars.entry(id_car.to_string()).or_default();
        subscribers.push(connection);
        debug!(id_car = %id_car, subscribers = subscribers.len(), "Connection registered");
    }

    /// Remove one registration of `connection` for `id_car`. Returns false when
    /// it was not registered.
    pub fn unregister(&self, id_car: &str, connection: &ConnectionSender) -> bool {
        let mut cars = self.cars.lock();
        let Some(subscribers) = cars.get_mut(id_car) else {
            return false;
        };

        let Some(pos) = subscribers.iter().position(|s| s.same_channel(connection)) else {
            return false;
        };
        subscribers.remove(pos);
        let remaining = subscribers.len();
        if remaining == 0 {
            cars.remove(id_car);
        }

        debug!(id_car = %id_car, subscribers = remaining, "Connection unregistered");
        true
    }

    /// Queue `payload` for every connection subscribed to `id_car`.
    ///
    /// Connections whose queue is closed or full are dropped from the car's set
    /// and do not affect delivery to the others. Returns the number of
    /// connections the payload was queued for.
    pub fn broadcast(&self, id_car: &str, payload: Message) -> usize {
        let mut cars = self.cars.lock();
        let Some(subscribers) = cars.get_mut(id_car) else {
            return 0;
        };

        let before = subscribers.len();
        subscribers.retain(|s| match s.try_send(payload.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(id_car = %id_car, "Connection queue full, dropping stalled subscriber");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        });
        let delivered = subscribers.len();

        if delivered < before {
            warn!(
                id_car = %id_car,
                dropped = before - delivered,
                "Dropped closed connections during broadcast"
            );
        }
        if subscribers.is_empty() {
            cars.remove(id_car);
        }

        delivered
    }

    pub fn subscriber_count(&self, id_car: &str) -> usize {
        self.cars.lock().get(id_car).map(Vec::len).unwrap_or(0)
    }

    /// Number of cars with at least one live connection
    pub fn car_count(&self) -> usize {
        self.cars.lock().len()
    }

    /// Register `connection` and return a guard that unregisters it when dropped
    pub fn subscribe(self: &Arc<Self>, id_car: &str, connection: ConnectionSender) -> Subscription {
        self.register(id_car, connection.clone());
        Subscription {
            registry: Arc::clone(self),
            id_car: id_car.to_string(),
            connection,
        }
    }
}

/// One live registration. Dropping it removes the registration, whichever way
/// the owning connection ends, including unwinding from a panic.
pub struct Subscription {
    registry: Arc<CarRegistry>,
    id_car: String,
    connection: ConnectionSender,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.unregister(&self.id_car, &self.connection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(msg: &Message) -> &str {
        match msg {
            Message::Text(t) => t.as_str(),
            other => panic!("expected text message, got {:?}", other),
        }
    }

    #[test]
    fn test_unregister_unknown_connection_is_noop() {
        let registry = CarRegistry::new();
        let (tx, _rx) = connection_queue();
        let (other, _other_rx) = connection_queue();

        assert!(!registry.unregister("ABC123", &tx));

        registry.register("ABC123", tx.clone());
        assert!(!registry.unregister("ABC123", &other));
        assert!(!registry.unregister("ZZZ999", &tx));
        assert_eq!(registry.subscriber_count("ABC123"), 1);
    }

    #[test]
    fn test_unregister_removes_exactly_one_registration() {
        let registry = CarRegistry::new();
        let (tx, _rx) = connection_queue();

        registry.register("ABC123", tx.clone());
        registry.register("ABC123", tx.clone());
        assert_eq!(registry.subscriber_count("ABC123"), 2);

        assert!(registry.unregister("ABC123", &tx));
        assert_eq!(registry.subscriber_count("ABC123"), 1);

        assert!(registry.unregister("ABC123", &tx));
        assert_eq!(registry.subscriber_count("ABC123"), 0);
        assert_eq!(registry.car_count(), 0);
    }

    #[test]
    fn test_broadcast_reaches_only_subscribers_of_that_car() {
        let registry = CarRegistry::new();
        let (a, mut a_rx) = connection_queue();
        let (b, mut b_rx) = connection_queue();
        let (c, mut c_rx) = connection_queue();

        registry.register("ABC123", a);
        registry.register("ABC123", b);
        registry.register("XYZ789", c);

        let delivered = registry.broadcast("ABC123", Message::Text("hello".into()));
        assert_eq!(delivered, 2);

        assert_eq!(text(&a_rx.try_recv().unwrap()), "hello");
        assert_eq!(text(&b_rx.try_recv().unwrap()), "hello");
        assert!(c_rx.try_recv().is_err());
    }

    #[test]
    fn test_broadcast_drops_failing_connection_without_affecting_others() {
        let registry = CarRegistry::new();
        let (good, mut good_rx) = connection_queue();
        let (broken, broken_rx) = connection_queue();
        drop(broken_rx);

        registry.register("ABC123", broken.clone());
        registry.register("ABC123", good);

        assert_eq!(registry.broadcast("ABC123", Message::Text("one".into())), 1);
        assert_eq!(text(&good_rx.try_recv().unwrap()), "one");
        assert_eq!(registry.subscriber_count("ABC123"), 1);

        // Already gone, so a later unregister from its owner is a no-op
        assert!(!registry.unregister("ABC123", &broken));

        assert_eq!(registry.broadcast("ABC123", Message::Text("two".into())), 1);
        assert_eq!(text(&good_rx.try_recv().unwrap()), "two");
    }

    #[test]
    fn test_broadcast_drops_connection_that_stopped_reading() {
        let registry = CarRegistry::new();
        let (stalled, mut stalled_rx) = connection_queue();
        let (reader, mut reader_rx) = connection_queue();

        registry.register("ABC123", stalled);
        registry.register("ABC123", reader);

        for _ in 0..CONNECTION_QUEUE_CAPACITY {
            assert_eq!(registry.broadcast("ABC123", Message::Text("tick".into())), 2);
            assert!(reader_rx.try_recv().is_ok());
        }

        // The stalled queue is full now, the reader keeps receiving
        assert_eq!(registry.broadcast("ABC123", Message::Text("tock".into())), 1);
        assert_eq!(text(&reader_rx.try_recv().unwrap()), "tock");
        assert_eq!(registry.subscriber_count("ABC123"), 1);

        let mut queued = 0;
        while stalled_rx.try_recv().is_ok() {
            queued += 1;
        }
        assert_eq!(queued, CONNECTION_QUEUE_CAPACITY);
    }

    #[test]
    fn test_broadcast_to_unwatched_car_delivers_nothing() {
        let registry = CarRegistry::new();
        assert_eq!(registry.broadcast("NOPE00", Message::Text("x".into())), 0);
        assert_eq!(registry.car_count(), 0);
    }

    #[test]
    fn test_subscription_unregisters_on_drop() {
        let registry = Arc::new(CarRegistry::new());
        let (tx, _rx) = connection_queue();

        let first = registry.subscribe("ABC123", tx.clone());
        let second = registry.subscribe("ABC123", tx);
        assert_eq!(registry.subscriber_count("ABC123"), 2);

        drop(first);
        assert_eq!(registry.subscriber_count("ABC123"), 1);
        drop(second);
        assert_eq!(registry.car_count(), 0);
    }

    #[test]
    fn test_subscription_unregisters_when_owner_panics() {
        let registry = Arc::new(CarRegistry::new());
        let (tx, _rx) = connection_queue();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _subscription = registry.subscribe("ABC123", tx);
            panic!("connection loop failed");
        }));

        assert!(result.is_err());
        assert_eq!(registry.subscriber_count("ABC123"), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_register_unregister_keeps_exact_counts() {
        const TASKS: usize = 64;
        const PER_TASK: usize = 50;

        let registry = Arc::new(CarRegistry::new());
        let mut handles = Vec::new();

        for task in 0..TASKS {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                let id_car = if task % 2 == 0 { "EVEN00" } else { "ODD111" };
                let mut keep = Vec::new();
                for i in 0..PER_TASK {
                    let (tx, rx) = connection_queue();
                    registry.register(id_car, tx.clone());
                    if i % 2 == 0 {
                        assert!(registry.unregister(id_car, &tx));
                    } else {
                        keep.push((tx, rx));
                    }
                    tokio::task::yield_now().await;
                }
                keep
            }));
        }

        let mut kept = Vec::new();
        for handle in handles {
            kept.extend(handle.await.unwrap());
        }

        let per_car = TASKS / 2 * PER_TASK / 2;
        assert_eq!(registry.subscriber_count("EVEN00"), per_car);
        assert_eq!(registry.subscriber_count("ODD111"), per_car);

        // Every surviving registration gets exactly one copy
        assert_eq!(registry.broadcast("EVEN00", Message::Text("ping".into())), per_car);
        let received: usize = kept
            .iter_mut()
            .map(|(_, rx)| {
                let mut n = 0;
                while rx.try_recv().is_ok() {
                    n += 1;
                }
                n
            })
            .sum();
        assert_eq!(received, per_car);
    }
}
