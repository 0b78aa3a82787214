use crate::domain::{Group, Member};
use crate::group_loader::serialized_group::{SerializedGroup, SerializedMember};
use std::collections::HashSet;
use thiserror::Error;

pub fn from_json(json: &str) -> Result<Group, GroupFactoryError> {
    let group = serde_json::from_str::<SerializedGroup>(json)?;

    if group.members.is_empty() {
        return Err(GroupFactoryError::NoMembers { group: group.name });
    }

    let mut seen = HashSet::new();
    for member in &group.members {
        if !seen.insert(member.id.as_str()) {
            return Err(GroupFactoryError::DuplicateMember {
                member: member.id.clone(),
                group: group.name,
            });
        }

        let has_address = member.address.as_deref().is_some_and(|address| !address.trim().is_empty());
        if !has_address && member.location.is_none() {
            return Err(GroupFactoryError::MissingLocation {
                member: member.id.clone(),
                group: group.name,
            });
        }
    }

    Ok(Group {
        id: group.id,
        name: group.name,
        venue_type: group.venue_type,
        meet_at: group.meet_at,
        members: group.members.into_iter().map(to_member).collect(),
    })
}

fn to_member(member: SerializedMember) -> Member {
    Member {
        id: member.id,
        name: member.name,
        // Blank input fields count as no address
        address: member.address.filter(|address| !address.trim().is_empty()),
        location: member.location,
        travel_mode: member.travel_mode,
    }
}

#[derive(Error, Debug)]
pub enum GroupFactoryError {
    #[error("json deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("group '{group}' has no members")]
    NoMembers { group: String },
    #[error("member '{member}' appears more than once in group '{group}'")]
    DuplicateMember { member: String, group: String },
    #[error("member '{member}' in group '{group}' has neither an address nor a location")]
    MissingLocation { member: String, group: String },
}
