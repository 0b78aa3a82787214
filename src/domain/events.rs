use crate::domain::MemberLocation;

#[derive(Debug)]
pub enum Event {
    LocationResolved(MemberLocation),
    #[allow(dead_code)]
    MemberRemoved(String),
    #[allow(dead_code)]
    Cleared,
}
