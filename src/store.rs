use crate::domain::events::Event;
use crate::domain::{GeoPoint, MemberLocation};
use crate::meetup::compute_midpoint;
use std::collections::HashMap;
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch;
use tokio::sync::watch::{Receiver as WatchReceiver, Sender as WatchSender};
use tracing::{debug, info, instrument, warn};

pub type LocationMap = HashMap<String, MemberLocation>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeetupSnapshot {
    pub locations: LocationMap,
    pub midpoint: Option<GeoPoint>,
}

/// Holds the resolved locations of a single meet-up session and keeps the midpoint current.
#[derive(Debug)]
pub struct MeetupStore {
    locations: LocationMap,
    midpoint: Option<GeoPoint>,
    rx: Receiver<Event>,
    notifier_tx: WatchSender<MeetupSnapshot>,
    notifier_rx: WatchReceiver<MeetupSnapshot>,
}

impl MeetupStore {
    pub fn new(rx: Receiver<Event>) -> Self {
        let (notifier_tx, notifier_rx) = watch::channel(MeetupSnapshot::default());

        MeetupStore {
            locations: HashMap::new(),
            midpoint: None,
            rx,
            notifier_tx,
            notifier_rx,
        }
    }

    pub fn notifier(&self) -> WatchReceiver<MeetupSnapshot> {
        self.notifier_rx.clone()
    }

    #[instrument(skip(self))]
    pub async fn listen(&mut self) {
        while let Some(event) = self.rx.recv().await {
            debug!("🔵 Received event: {:?}", event);
            self.apply(event);
            self.recompute_midpoint();
            self.notifier_tx
                .send(MeetupSnapshot {
                    locations: self.locations.clone(),
                    midpoint: self.midpoint,
                })
                .unwrap_or_default();
        }
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::LocationResolved(location) => {
                info!(member_id = location.member_id, "📍 Location of member '{}' set to {}", location.member_id, location.point);
                self.locations.insert(location.member_id.clone(), location);
            }
            Event::MemberRemoved(member_id) => {
                if self.locations.remove(&member_id).is_none() {
                    warn!(member_id, "⚠️ Received removal for unknown member '{}'", member_id);
                    return;
                }
                info!(member_id, "🔴 Removed location of member '{}'", member_id);
            }
            Event::Cleared => {
                info!("🔴 Cleared {} location(s)", self.locations.len());
                self.locations.clear();
            }
        }
    }

    // On invalid input the previous midpoint stays in place
    fn recompute_midpoint(&mut self) {
        let points = self.locations.values().map(|location| location.point).collect::<Vec<_>>();

        match compute_midpoint(&points) {
            Ok(midpoint) => {
                debug!("🔵 Midpoint of {} location(s) is {}", points.len(), midpoint);
                self.midpoint = Some(midpoint);
            }
            Err(e) => warn!("⚠️ Midpoint not available, keeping the previous one: {}", e),
        }
    }
}
