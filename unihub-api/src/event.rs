#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct EventId(pub i64);

impl EventId {
    pub fn stub() -> EventId {
        EventId(0)
    }
}
