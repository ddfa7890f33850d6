use super::network::types as network_types;
use crate::app::server::grpc::server::{self as grpc, VoteState};

impl From<grpc::VoteEntry> for network_types::VoteRow {
    fn from(entry: grpc::VoteEntry) -> Self {
        let vote = match (entry.state(), entry.value) {
            (VoteState::Revealed, Some(value)) => network_types::VoteDisplay::Revealed(value),
            (VoteState::Hidden, _) => network_types::VoteDisplay::Hidden,
            _ => network_types::VoteDisplay::Unset,
        };

        Self {
            user_name: entry.user_name,
            vote,
        }
    }
}

impl From<grpc::RoomSummary> for network_types::RoomListing {
    fn from(summary: grpc::RoomSummary) -> Self {
        Self {
            room_name: summary.room_name,
            user_count: summary.user_count,
            voted_count: summary.voted_count,
        }
    }
}

impl network_types::RoomView {
    pub fn from_snapshot(room_name: String, snapshot: grpc::RoomSnapshotResponse) -> Self {
        Self {
            room_name,
            all_voted: snapshot.all_voted,
            votes: snapshot.entries.into_iter().map(From::from).collect(),
        }
    }
}

impl network_types::VoteDisplay {
    pub fn label(&self) -> &str {
        match self {
            network_types::VoteDisplay::Unset => "",
            network_types::VoteDisplay::Hidden => "hidden",
            network_types::VoteDisplay::Revealed(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use network_types::{VoteDisplay, VoteRow};

    fn entry(user_name: &str, state: VoteState, value: Option<&str>) -> grpc::VoteEntry {
        grpc::VoteEntry {
            user_name: user_name.to_string(),
            state: state as i32,
            value: value.map(ToString::to_string),
        }
    }

    #[test]
    fn vote_entries_become_rows() {
        let row = VoteRow::from(entry("bob", VoteState::Hidden, None));
        assert_eq!(row.vote, VoteDisplay::Hidden);
        assert_eq!(row.vote.label(), "hidden");

        let row = VoteRow::from(entry("alice", VoteState::Revealed, Some("8")));
        assert_eq!(row.vote, VoteDisplay::Revealed("8".to_string()));
        assert_eq!(row.vote.label(), "8");

        let row = VoteRow::from(entry("carol", VoteState::Unset, None));
        assert_eq!(row.vote.label(), "");
    }

    #[test]
    fn unknown_states_are_shown_as_unset() {
        let mut unknown = entry("dave", VoteState::Unset, Some("5"));
        unknown.state = 42;
        assert_eq!(VoteRow::from(unknown).vote, VoteDisplay::Unset);
    }
}
