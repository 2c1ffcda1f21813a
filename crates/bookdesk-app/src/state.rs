// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use url::Url;

use crate::forms::{BookingForm, GateError};
use crate::history::{NavigationHistory, url_with_service};
use crate::model::{
    BookingDraft, BookingResponse, BookingResultData, ServiceKind, SubmissionErrorKind,
};

pub const ERROR_BANNER_TITLE: &str = "提交失敗";
pub const SUBMITTING_MESSAGE: &str = "正在提交預約...";
const IN_FLIGHT_MESSAGE: &str = "預約正在提交中，請稍候";
const RESULTS_OPEN_MESSAGE: &str = "請先返回預約表單";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting {
        request_id: u64,
        service: ServiceKind,
    },
    Succeeded {
        service: ServiceKind,
        response: BookingResponse,
    },
    Failed {
        kind: SubmissionErrorKind,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    InFlight,
    ResultsOpen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub active_service: ServiceKind,
    pub form: BookingForm,
    pub submission: SubmissionState,
    pub history: NavigationHistory,
    pub status_line: Option<String>,
    next_request_id: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SwitchService(ServiceKind),
    HistoryBack,
    HistoryForward,
    Submit,
    CompleteSubmission {
        request_id: u64,
        response: BookingResponse,
    },
    DismissError,
    Reset,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    ServiceChanged(ServiceKind),
    HistoryPushed(Url),
    HistoryMoved(Url),
    ValidationFailed(GateError),
    SubmissionStarted {
        request_id: u64,
        draft: BookingDraft,
    },
    SubmitRejected(SubmitRejection),
    SubmissionSucceeded {
        request_id: u64,
        has_results: bool,
    },
    SubmissionFailed {
        kind: SubmissionErrorKind,
        message: String,
    },
    StaleCompletionIgnored {
        request_id: u64,
    },
    ErrorDismissed,
    ResetToForm,
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    /// Starts on the service named by the deep link.
    pub fn new(initial: Url) -> Self {
        let history = NavigationHistory::new(initial);
        let active_service = history.current_service();
        Self {
            active_service,
            form: BookingForm::fresh(active_service),
            submission: SubmissionState::Idle,
            history,
            status_line: None,
            next_request_id: 1,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SwitchService(service) => self.switch_service(service),
            AppCommand::HistoryBack => {
                let moved = self.history.back().cloned();
                self.follow_history(moved)
            }
            AppCommand::HistoryForward => {
                let moved = self.history.forward().cloned();
                self.follow_history(moved)
            }
            AppCommand::Submit => self.submit(),
            AppCommand::CompleteSubmission {
                request_id,
                response,
            } => self.complete(request_id, response),
            AppCommand::DismissError => {
                if matches!(self.submission, SubmissionState::Failed { .. }) {
                    self.submission = SubmissionState::Idle;
                    vec![AppEvent::ErrorDismissed]
                } else {
                    Vec::new()
                }
            }
            AppCommand::Reset => {
                if self.is_submitting() {
                    return Vec::new();
                }
                self.submission = SubmissionState::Idle;
                self.form = BookingForm::fresh(self.active_service);
                vec![AppEvent::ResetToForm]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionState::Submitting { .. })
    }

    /// Result envelope to show, if the last submission produced one.
    pub fn showing_results(&self) -> Option<(ServiceKind, &BookingResultData)> {
        match &self.submission {
            SubmissionState::Succeeded { service, response } => {
                response.data.as_ref().map(|data| (*service, data))
            }
            _ => None,
        }
    }

    pub fn error_banner(&self) -> Option<(&'static str, &str)> {
        match &self.submission {
            SubmissionState::Failed { message, .. } => Some((ERROR_BANNER_TITLE, message.as_str())),
            _ => None,
        }
    }

    fn switch_service(&mut self, service: ServiceKind) -> Vec<AppEvent> {
        if service == self.active_service {
            return Vec::new();
        }
        self.active_service = service;
        self.form = BookingForm::fresh(service);
        let url = url_with_service(self.history.current(), service);
        self.history.push(url.clone());
        vec![
            AppEvent::ServiceChanged(service),
            AppEvent::HistoryPushed(url),
        ]
    }

    fn follow_history(&mut self, moved: Option<Url>) -> Vec<AppEvent> {
        let Some(url) = moved else {
            return Vec::new();
        };
        let mut events = vec![AppEvent::HistoryMoved(url)];
        let service = self.history.current_service();
        if service != self.active_service {
            self.active_service = service;
            self.form = BookingForm::fresh(service);
            events.push(AppEvent::ServiceChanged(service));
        }
        events
    }

    fn submit(&mut self) -> Vec<AppEvent> {
        match self.submission {
            SubmissionState::Submitting { .. } => {
                return vec![
                    AppEvent::SubmitRejected(SubmitRejection::InFlight),
                    self.set_status(IN_FLIGHT_MESSAGE),
                ];
            }
            SubmissionState::Succeeded { .. } if self.showing_results().is_some() => {
                return vec![
                    AppEvent::SubmitRejected(SubmitRejection::ResultsOpen),
                    self.set_status(RESULTS_OPEN_MESSAGE),
                ];
            }
            _ => {}
        }

        let draft = match self.form.gate() {
            Ok(draft) => draft,
            Err(error) => return vec![AppEvent::ValidationFailed(error)],
        };
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.submission = SubmissionState::Submitting {
            request_id,
            service: draft.service_kind(),
        };
        vec![AppEvent::SubmissionStarted { request_id, draft }]
    }

    fn complete(&mut self, request_id: u64, response: BookingResponse) -> Vec<AppEvent> {
        let service = match self.submission {
            SubmissionState::Submitting {
                request_id: pending,
                service,
            } if pending == request_id => service,
            _ => return vec![AppEvent::StaleCompletionIgnored { request_id }],
        };

        if response.success {
            let has_results = response.data.is_some();
            if has_results {
                self.submission = SubmissionState::Succeeded { service, response };
                vec![AppEvent::SubmissionSucceeded {
                    request_id,
                    has_results,
                }]
            } else {
                self.submission = SubmissionState::Idle;
                vec![
                    AppEvent::SubmissionSucceeded {
                        request_id,
                        has_results,
                    },
                    self.set_status(&response.message),
                ]
            }
        } else {
            let kind = response.error.unwrap_or(SubmissionErrorKind::Submission);
            self.submission = SubmissionState::Failed {
                kind,
                message: response.message.clone(),
            };
            vec![AppEvent::SubmissionFailed {
                kind,
                message: response.message,
            }]
        }
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
