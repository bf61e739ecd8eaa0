//=========================================================================
// Region Notices
//=========================================================================
//
// Region → surface selection messages.
//
// Architecture:
//   Region ──notify()──→ crossbeam channel ──try_next()──→ InteractionSurface
//
// The surface creates the channel at construction and hands a cloned
// `Notifier` to each region; nothing else can publish on it.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::RegionId;

//=== RegionNotice ========================================================

/// A region asking the surface to make it the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionNotice {
    /// Desktop path: pressed with a mouse.
    Selected(RegionId),

    /// Touch path: tapped (or touched while already selected).
    SelectedTouch(RegionId),
}

//=== Notifier ============================================================

/// Sending half held by every region.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: Sender<RegionNotice>,
}

impl Notifier {
    pub fn notify(&self, notice: RegionNotice) {
        trace!(target: "region", "Notice {:?}", notice);
        if self.sender.send(notice).is_err() {
            warn!(target: "region", "Notice channel disconnected, dropping {:?}", notice);
        }
    }
}

//=== NoticeInbox =========================================================

/// Receiving half owned by the surface.
#[derive(Debug)]
pub struct NoticeInbox {
    receiver: Receiver<RegionNotice>,
}

impl NoticeInbox {
    /// Takes the oldest queued notice, if any.
    pub fn try_next(&self) -> Option<RegionNotice> {
        self.receiver.try_recv().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

/// Creates a connected notifier/inbox pair.
pub fn notice_channel() -> (Notifier, NoticeInbox) {
    let (sender, receiver) = unbounded();
    (Notifier { sender }, NoticeInbox { receiver })
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_arrive_in_order() {
        let (notifier, inbox) = notice_channel();
        let cloned = notifier.clone();

        notifier.notify(RegionNotice::Selected(RegionId(0)));
        cloned.notify(RegionNotice::SelectedTouch(RegionId(2)));

        let received: Vec<_> = std::iter::from_fn(|| inbox.try_next()).collect();
        assert_eq!(
            received,
            vec![
                RegionNotice::Selected(RegionId(0)),
                RegionNotice::SelectedTouch(RegionId(2)),
            ]
        );
        assert!(inbox.is_empty());
    }

    #[test]
    fn notify_after_inbox_dropped_does_not_panic() {
        let (notifier, inbox) = notice_channel();
        drop(inbox);

        notifier.notify(RegionNotice::Selected(RegionId(1)));
    }
}
