use super::codec::{LineKind, Reply, decode_line};
use super::link::CardLink;
use crate::domain::event::CardEvent;
use crate::error::Result;
use crate::shutdown::Shutdown;
use log::{debug, info, warn};
use std::time::Duration;

/// Waits for card-presence events on a reader link and sends replies back.
///
/// The link is owned here for the whole session, so every read and write
/// goes through one handle that is released when the reader is dropped.
pub struct CardReader<L: CardLink> {
    link: L,
    idle_backoff: Duration,
}

impl<L: CardLink> CardReader<L> {
    pub fn new(link: L, idle_backoff: Duration) -> Self {
        Self { link, idle_backoff }
    }

    /// Blocks until a `[card_data]` line arrives and returns its decoded event.
    ///
    /// Every received line is echoed to the log. Untagged lines are skipped.
    /// Returns `Ok(None)` if `shutdown` fires first.
    pub async fn next_event(&mut self, shutdown: &mut Shutdown) -> Result<Option<CardEvent>> {
        loop {
            if shutdown.is_triggered() {
                return Ok(None);
            }

            if self.link.bytes_available()? == 0 {
                tokio::select! {
                    _ = tokio::time::sleep(self.idle_backoff) => {}
                    _ = shutdown.wait() => return Ok(None),
                }
                continue;
            }

            let Some(line) = self.link.read_line()? else {
                debug!("read attempt timed out, polling again");
                continue;
            };
            info!("{}", line);

            match decode_line(&line) {
                LineKind::Ignored => continue,
                LineKind::CardData(CardEvent::Malformed(e)) => {
                    warn!("invalid card_data: {}", e);
                    return Ok(Some(CardEvent::Malformed(e)));
                }
                LineKind::CardData(event) => return Ok(Some(event)),
            }
        }
    }

    pub fn send_reply(&mut self, reply: &Reply) -> Result<()> {
        debug!("replying to reader: {}", reply);
        self.link.write_all(&reply.encode())
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn into_link(self) -> L {
        self.link
    }
}
