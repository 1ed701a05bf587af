use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::infrastructure::realtime::{RealtimeClient, Subscription};

/// Subscriptions owned by one component; emptied (and thus unsubscribed)
/// when the component unmounts or the holder is cleared
pub type SubscriptionSet = Rc<RefCell<Vec<Subscription>>>;

/// Shared realtime client, with its drain task bound to the calling scope.
///
/// Call once near the root: only the first pump gets the transport channel.
pub fn use_realtime() -> RealtimeClient {
    use_hook(|| {
        let client = RealtimeClient::global();
        spawn(client.clone().pump());
        client
    })
}

pub fn use_subscription_set() -> SubscriptionSet {
    use_hook(|| Rc::new(RefCell::new(Vec::new())))
}
