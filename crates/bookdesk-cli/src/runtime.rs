// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use bookdesk_app::{BookingDraft, BookingResponse};
use bookdesk_client::Client;
use bookdesk_testkit::BookingFaker;
use bookdesk_tui::{BookingRuntime, InternalEvent};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::warn;

const DEMO_SEED: u64 = 20260302;

/// Submits to the configured webhook on a worker thread so the UI keeps
/// drawing while the request is in flight.
pub struct WebhookRuntime {
    client: Client,
}

impl WebhookRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl BookingRuntime for WebhookRuntime {
    fn submit_booking(&mut self, draft: &BookingDraft) -> BookingResponse {
        self.client.submit(draft)
    }

    fn spawn_submission(
        &mut self,
        request_id: u64,
        draft: BookingDraft,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let client = self.client.clone();
        thread::Builder::new()
            .name("booking-submit".to_owned())
            .spawn(move || {
                let response = client.submit(&draft);
                if tx
                    .send(InternalEvent::SubmissionFinished {
                        request_id,
                        response,
                    })
                    .is_err()
                {
                    warn!(request_id, "UI closed before the submission finished");
                }
            })
            .context("spawn submission worker")?;
        Ok(())
    }
}

/// Offline backend that answers every booking with generated
/// recommendations.
pub struct DemoRuntime {
    faker: BookingFaker,
}

impl DemoRuntime {
    pub fn new() -> Self {
        Self {
            faker: BookingFaker::new(DEMO_SEED),
        }
    }
}

impl Default for DemoRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingRuntime for DemoRuntime {
    fn submit_booking(&mut self, draft: &BookingDraft) -> BookingResponse {
        self.faker.demo_response(draft)
    }
}
