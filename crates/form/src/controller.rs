//! Lead form state machine
//!
//! The controller owns the field values and the submission state of one form.
//! A renderer reads it through [`LeadForm::state`] or follows it with
//! [`LeadForm::subscribe`]; transient toasts are drained with
//! [`LeadForm::take_notices`].

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use agentika_lead::{LeadInput, LeadService, SubmissionResult};
use tokio::{sync::watch, task::JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Company,
    Role,
    Employees,
    Processes,
    Message,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { provider_message_id: String },
    Failed { message: String },
    /// Validation failed, nothing was sent.
    Invalid { fields: Vec<String> },
    /// A submission is already in flight or waiting for its reset.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTimings {
    pub reset_after: Duration,
    pub error_dismiss_after: Duration,
    pub submit_timeout: Duration,
}

impl Default for FormTimings {
    fn default() -> Self {
        Self {
            reset_after: Duration::from_secs(3),
            error_dismiss_after: Duration::from_secs(5),
            submit_timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Default)]
struct Inner {
    input: LeadInput,
    notices: Vec<Notice>,
    timer: Option<JoinHandle<()>>,
}

impl Inner {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

struct Shared {
    inner: Mutex<Inner>,
    state: watch::Sender<FormState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    fn transition(&self, next: FormState) {
        tracing::debug!(state = ?next, "Lead form state changed");
        self.state.send_replace(next);
    }

    fn reset(&self, inner: &mut Inner) {
        inner.cancel_timer();
        inner.input = LeadInput::default();
        self.transition(FormState::Idle);
    }
}

pub struct LeadForm {
    service: Arc<dyn LeadService>,
    timings: FormTimings,
    shared: Arc<Shared>,
}

impl LeadForm {
    pub fn new(service: impl LeadService + 'static, timings: FormTimings) -> Self {
        let (state, _) = watch::channel(FormState::Idle);

        Self {
            service: Arc::new(service),
            timings,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                state,
            }),
        }
    }

    pub fn state(&self) -> FormState {
        self.shared.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.shared.state.subscribe()
    }

    pub fn fields(&self) -> LeadInput {
        self.shared.lock().input.clone()
    }

    /// Update one field. Returns false when the form is locked by a
    /// submission in flight or a pending reset.
    pub fn set_field(&self, field: Field, value: impl Into<String>) -> bool {
        let mut inner = self.shared.lock();

        match self.shared.state() {
            FormState::Submitting | FormState::Submitted => return false,
            FormState::Error { .. } => {
                inner.cancel_timer();
                self.shared.transition(FormState::Idle);
            }
            FormState::Idle => {}
        }

        let value = value.into();
        let input = &mut inner.input;
        match field {
            Field::Name => input.name = value,
            Field::Email => input.email = value,
            Field::Company => input.company = value,
            Field::Role => input.role = value,
            Field::Employees => input.employees = value,
            Field::Processes => input.processes = value,
            Field::Message => input.message = value,
        }

        true
    }

    pub fn can_submit(&self) -> bool {
        let inner = self.shared.lock();

        matches!(
            self.shared.state(),
            FormState::Idle | FormState::Error { .. }
        ) && inner.input.has_required_fields()
    }

    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.shared.lock().notices)
    }

    /// Validate the fields and send them once.
    ///
    /// Concurrent calls while a submission is in flight return
    /// [`SubmitOutcome::Busy`] without reaching the service.
    pub async fn submit(&self) -> SubmitOutcome {
        let lead = {
            let mut inner = self.shared.lock();

            if matches!(
                self.shared.state(),
                FormState::Submitting | FormState::Submitted
            ) {
                return SubmitOutcome::Busy;
            }

            let lead = match inner.input.clone().into_submission() {
                Ok(lead) => lead,
                Err(err) => {
                    tracing::debug!(fields = ?err.fields(), "Lead form is invalid");
                    return SubmitOutcome::Invalid {
                        fields: err.fields(),
                    };
                }
            };

            inner.cancel_timer();
            self.shared.transition(FormState::Submitting);

            lead
        };

        tracing::info!(company = %lead.company, "Submitting lead");

        let result =
            match tokio::time::timeout(self.timings.submit_timeout, self.service.submit(lead))
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    tracing::error!(timeout = ?self.timings.submit_timeout, "Lead submission timed out");
                    SubmissionResult::failure(crate::TIMEOUT_MESSAGE)
                }
            };

        let mut inner = self.shared.lock();

        match result {
            SubmissionResult::Success {
                provider_message_id,
            } => {
                inner.notices.push(Notice::Success);
                self.shared.transition(FormState::Submitted);
                inner.timer = Some(self.schedule(self.timings.reset_after, |shared, inner| {
                    if shared.state() == FormState::Submitted {
                        shared.reset(inner);
                    }
                }));

                SubmitOutcome::Submitted {
                    provider_message_id,
                }
            }
            SubmissionResult::Failure { error_message } => {
                tracing::warn!(error = %error_message, "Lead submission failed");

                inner.notices.push(Notice::Error(error_message.to_owned()));
                self.shared.transition(FormState::Error {
                    message: error_message.to_owned(),
                });
                inner.timer = Some(self.schedule(
                    self.timings.error_dismiss_after,
                    |shared, _| {
                        if matches!(shared.state(), FormState::Error { .. }) {
                            shared.transition(FormState::Idle);
                        }
                    },
                ));

                SubmitOutcome::Failed {
                    message: error_message,
                }
            }
        }
    }

    /// Clear the error and go back to editing, keeping the fields.
    pub fn dismiss_error(&self) {
        let mut inner = self.shared.lock();

        if matches!(self.shared.state(), FormState::Error { .. }) {
            inner.cancel_timer();
            self.shared.transition(FormState::Idle);
        }
    }

    /// The user closed the form.
    ///
    /// A submission in flight keeps running; a pending reset happens now.
    pub fn close(&self) {
        let mut inner = self.shared.lock();

        match self.shared.state() {
            FormState::Submitted => self.shared.reset(&mut inner),
            FormState::Error { .. } => {
                inner.cancel_timer();
                self.shared.transition(FormState::Idle);
            }
            FormState::Idle | FormState::Submitting => {}
        }
    }

    fn schedule<F>(&self, after: Duration, f: F) -> JoinHandle<()>
    where
        F: FnOnce(&Shared, &mut Inner) + Send + 'static,
    {
        let shared = self.shared.clone();

        tokio::spawn(async move {
            tokio::time::sleep(after).await;

            let mut inner = shared.lock();

            // Aborted after waking up; the slot may hold a newer timer.
            if inner.timer.as_ref().map(JoinHandle::id) != Some(tokio::task::id()) {
                return;
            }

            inner.timer = None;
            f(&shared, &mut inner);
        })
    }
}

impl Drop for LeadForm {
    fn drop(&mut self) {
        self.shared.lock().cancel_timer();
    }
}
