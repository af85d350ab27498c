use super::participant::ParticipantId;

/// A decoded QR payload of the form `eventName,identifier`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPayload<'a> {
    pub event_name: &'a str,
    pub id: ParticipantId,
}

impl<'a> ScanPayload<'a> {
    /// Split on the first comma and normalize the identifier portion.
    ///
    /// Never fails: a missing identifier pads to `000000`, and malformed
    /// identifiers are kept for display and caught by [`ScanPayload::number`].
    pub fn parse(raw: &'a str) -> Self {
        let (event_name, id_raw) = match raw.split_once(',') {
            Some((event_name, id_raw)) => (event_name, id_raw),
            None => (raw, ""),
        };
        Self {
            event_name,
            id: ParticipantId::normalize(id_raw),
        }
    }

    /// Numeric identifier, `None` if the padded id is not an integer
    pub fn number(&self) -> Option<u64> {
        self.id.number()
    }
}
