//! Draft identity and the create-vs-update decision.

use super::EditorMode;
use super::payload::SubmitAction;
use crate::domain::PostId;

/// Which backend post this editor session is bound to, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftIdentity {
    #[default]
    Absent,
    Known(PostId),
}

impl DraftIdentity {
    pub fn id(&self) -> Option<&PostId> {
        match self {
            DraftIdentity::Absent => None,
            DraftIdentity::Known(id) => Some(id),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, DraftIdentity::Known(_))
    }
}

impl From<Option<PostId>> for DraftIdentity {
    fn from(id: Option<PostId>) -> Self {
        id.map_or(DraftIdentity::Absent, DraftIdentity::Known)
    }
}

/// Remote operation chosen for a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRoute {
    Create,
    Update(PostId),
}

/// Pick create or update for `action`.
///
/// Edit mode always updates its post. In create mode only draft saves reuse
/// a known id; publish and schedule go through create, which the backend
/// folds into the user's existing draft.
pub fn route_for(mode: EditorMode, identity: &DraftIdentity, action: SubmitAction) -> SaveRoute {
    match (mode, identity.id()) {
        (EditorMode::Edit, Some(id)) => SaveRoute::Update(id.clone()),
        (_, Some(id)) if action == SubmitAction::Draft => SaveRoute::Update(id.clone()),
        _ => SaveRoute::Create,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(id: &str) -> DraftIdentity {
        DraftIdentity::Known(PostId::new(id))
    }

    #[test]
    fn test_create_mode_without_draft_creates() {
        for action in [SubmitAction::Draft, SubmitAction::Publish, SubmitAction::Schedule] {
            assert_eq!(
                route_for(EditorMode::Create, &DraftIdentity::Absent, action),
                SaveRoute::Create
            );
        }
    }

    #[test]
    fn test_create_mode_draft_save_reuses_known_draft() {
        assert_eq!(
            route_for(EditorMode::Create, &known("d1"), SubmitAction::Draft),
            SaveRoute::Update(PostId::new("d1"))
        );
    }

    #[test]
    fn test_create_mode_publish_goes_through_create() {
        assert_eq!(
            route_for(EditorMode::Create, &known("d1"), SubmitAction::Publish),
            SaveRoute::Create
        );
        assert_eq!(
            route_for(EditorMode::Create, &known("d1"), SubmitAction::Schedule),
            SaveRoute::Create
        );
    }

    #[test]
    fn test_edit_mode_always_updates() {
        for action in [SubmitAction::Draft, SubmitAction::Publish, SubmitAction::Schedule] {
            assert_eq!(
                route_for(EditorMode::Edit, &known("p9"), action),
                SaveRoute::Update(PostId::new("p9"))
            );
        }
    }
}
