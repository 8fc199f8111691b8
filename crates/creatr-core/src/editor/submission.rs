//! Submission controller - save draft, publish and schedule.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use super::draft::{DraftIdentity, SaveRoute, route_for};
use super::form::PostForm;
use super::payload::{SubmitAction, build_payload, parse_local_datetime};
use super::{EditorConfig, EditorMode, EditorServices};
use crate::domain::{PostId, Route};
use crate::error::{EditorError, FormErrors};

const GENERIC_SAVE_ERROR: &str = "Failed to save post";
const SCHEDULE_MISSING: &str = "Please select a date and time to schedule";

/// Runs user and autosave submissions against the post service.
///
/// Owns the session's [`DraftIdentity`]; every successful draft or schedule
/// save records the id it returned so later saves update instead of
/// creating again.
pub struct SubmissionController {
    mode: EditorMode,
    config: EditorConfig,
    services: EditorServices,
    identity: Mutex<DraftIdentity>,
    in_flight: AtomicUsize,
    disposed: CancellationToken,
}

impl SubmissionController {
    pub fn new(
        mode: EditorMode,
        config: EditorConfig,
        services: EditorServices,
        identity: DraftIdentity,
    ) -> Self {
        Self {
            mode,
            config,
            services,
            identity: Mutex::new(identity),
            in_flight: AtomicUsize::new(0),
            disposed: CancellationToken::new(),
        }
    }

    pub fn identity(&self) -> DraftIdentity {
        self.identity
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether a user-triggered submission is waiting on the backend.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Stop applying results; called when the editor unmounts.
    pub fn dispose(&self) {
        self.disposed.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.is_cancelled()
    }

    /// Save as draft. A silent save shows nothing to the user, success or not.
    pub async fn save_draft(&self, form: &PostForm, silent: bool) -> Result<PostId, EditorError> {
        self.submit(form, SubmitAction::Draft, silent).await
    }

    /// Publish and, on success, go to the post listing.
    ///
    /// A successful publish closes the controller: later submissions fail
    /// with [`EditorError::Closed`].
    pub async fn publish(&self, form: &PostForm) -> Result<PostId, EditorError> {
        self.submit(form, SubmitAction::Publish, false).await
    }

    /// Schedule publication at the form's `scheduled_for` time.
    pub async fn schedule(&self, form: &PostForm) -> Result<PostId, EditorError> {
        if form.scheduled_for().is_empty() && !self.is_disposed() {
            self.services.notifier.error(SCHEDULE_MISSING);
            return Err(EditorError::ScheduleMissing);
        }
        self.submit(form, SubmitAction::Schedule, false).await
    }

    async fn submit(
        &self,
        form: &PostForm,
        action: SubmitAction,
        silent: bool,
    ) -> Result<PostId, EditorError> {
        if self.is_disposed() {
            tracing::debug!(?action, silent, "Editor closed; submission refused");
            return Err(EditorError::Closed);
        }
        form.check().map_err(EditorError::Validation)?;
        if action == SubmitAction::Schedule {
            self.check_schedule_in_future(form)?;
        }

        let payload = build_payload(form, action, self.config.utc_offset);
        let route = route_for(self.mode, &self.identity(), action);
        tracing::debug!(?action, ?route, silent, "Submitting post");

        let _busy = (!silent).then(|| InFlight::enter(&self.in_flight));
        let result = match &route {
            SaveRoute::Create => self.services.posts.create_post(payload).await,
            SaveRoute::Update(id) => self.services.posts.update_post(id, payload).await,
        };

        if self.is_disposed() {
            tracing::warn!(?action, ok = result.is_ok(), "Save resolved after unmount; ignoring");
            return result.map_err(EditorError::from);
        }

        match result {
            Ok(id) => {
                if action == SubmitAction::Publish {
                    // A published post is no longer a draft; nothing may save over it.
                    self.dispose();
                } else {
                    *self.identity.lock().unwrap_or_else(|e| e.into_inner()) =
                        DraftIdentity::Known(id.clone());
                }
                tracing::info!(post_id = %id, ?action, silent, "Post saved");

                if !silent {
                    self.services.notifier.success(action.success_message());
                    if action == SubmitAction::Publish {
                        self.services.navigator.push(Route::Posts);
                    }
                }
                Ok(id)
            }
            Err(err) => {
                if silent {
                    tracing::warn!(error = %err, "Silent save failed");
                } else {
                    tracing::error!(error = %err, ?action, "Save failed");
                    self.services
                        .notifier
                        .error(err.backend_message().unwrap_or(GENERIC_SAVE_ERROR));
                }
                Err(err.into())
            }
        }
    }

    fn check_schedule_in_future(&self, form: &PostForm) -> Result<(), EditorError> {
        let in_future = parse_local_datetime(form.scheduled_for(), self.config.utc_offset)
            .is_some_and(|at| at.timestamp_millis() > Utc::now().timestamp_millis());
        if in_future {
            return Ok(());
        }
        let mut errors = FormErrors::new();
        errors.add("scheduled_for", "Scheduled time must be in the future");
        Err(EditorError::Validation(errors))
    }
}

/// Counts a user-triggered submission for the header's busy state.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
