use tracing::{debug, info, info_span, warn};

use crate::classifier::{should_update, Classification, Classifier, FilterDecision, MessageFilter};
use crate::config::TrackerConfig;
use crate::email::{decode_subject, parse_sent_date, InboundEmail};
use crate::error::EmailError;
use crate::sanitize;
use crate::store::{IdentityKey, JobApplicationRecord, RecordStore};

use super::context::MessageContext;
use super::error::PipelineError;
use super::report::{IngestReport, MessageOutcome, SkipReason};

/// Runs messages through filter, classifier and the status merge against a
/// [`RecordStore`].
pub struct IngestPipeline {
    filter: MessageFilter,
    classifier: Classifier,
}

impl IngestPipeline {
    /// Production constructor: builds the filter and classifier from config.
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            filter: MessageFilter::new(&config.filter),
            classifier: Classifier::new(&config.classifier),
        }
    }

    pub fn new(filter: MessageFilter, classifier: Classifier) -> Self {
        Self { filter, classifier }
    }

    /// Processes a batch in order. Per-message failures are reported as
    /// skipped and never abort the batch.
    pub fn run<I>(&self, store: &mut RecordStore, messages: I) -> IngestReport
    where
        I: IntoIterator<Item = Result<InboundEmail, EmailError>>,
    {
        let _ingest_span = info_span!("ingest", known_records = store.len()).entered();
        let mut report = IngestReport::default();

        for message in messages {
            let email = match message {
                Ok(email) => email,
                Err(e) => {
                    let e = PipelineError::from(e);
                    warn!(error = %e, "Skipping unreadable message");
                    report.record(None, MessageOutcome::Skipped(SkipReason::Failed(e.to_string())));
                    continue;
                }
            };

            let outcome = match self.process(store, &email) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(uid = email.uid.as_deref().unwrap_or("none"), error = %e, "Message failed");
                    MessageOutcome::Skipped(SkipReason::Failed(e.to_string()))
                }
            };
            report.record(email.uid.as_deref(), outcome);
        }

        info!(
            created = report.created.len(),
            updated = report.updated.len(),
            skipped = report.skipped.len(),
            "Ingest finished"
        );
        report
    }

    /// Runs the steps for a single message and applies the result to `store`.
    pub fn process(
        &self,
        store: &mut RecordStore,
        email: &InboundEmail,
    ) -> Result<MessageOutcome, PipelineError> {
        let mut ctx = MessageContext::new(email);
        let sender = sanitize::redact_sender(&email.from);
        let _message_span = info_span!("message",
            uid = ctx.uid().unwrap_or("none"),
            sender = %sender,
        )
        .entered();

        // Step 1: Known identifier
        if self.step_check_seen(store, &ctx) {
            debug!("Already processed");
            return Ok(MessageOutcome::Skipped(SkipReason::AlreadyProcessed));
        }

        // Step 2: Relevance filter
        {
            let _step = info_span!("filter").entered();
            let decision = self.step_filter(&mut ctx);
            if !decision.is_accept() {
                debug!(decision = ?decision, "Filtered out");
                return Ok(MessageOutcome::Skipped(SkipReason::Filtered(decision)));
            }
        }

        // Step 3: Headers
        self.step_headers(&mut ctx);

        // Step 4: Classify
        let classification = {
            let _step = info_span!("classify").entered();
            self.step_classify(&ctx)
        };

        // Step 5+6+7: Resolve identity and merge
        let _step = info_span!("merge").entered();
        self.step_merge(store, &ctx, classification)
    }

    fn step_check_seen(&self, store: &RecordStore, ctx: &MessageContext<'_>) -> bool {
        ctx.uid().is_some_and(|uid| store.contains_message_id(uid))
    }

    fn step_filter(&self, ctx: &mut MessageContext<'_>) -> FilterDecision {
        ctx.subject = decode_subject(&ctx.email.subject);
        self.filter.evaluate_message(&ctx.subject, &ctx.email.labels)
    }

    fn step_headers(&self, ctx: &mut MessageContext<'_>) {
        ctx.date = Some(parse_sent_date(ctx.email.date.as_deref()));
        ctx.sender = ctx.email.from.trim().to_string();
    }

    fn step_classify(&self, ctx: &MessageContext<'_>) -> Classification {
        let classification =
            self.classifier
                .classify(&ctx.subject, &ctx.sender, ctx.email.body.as_deref());
        debug!(
            title = %classification.title,
            company = %classification.company,
            status = %classification.status,
            "Classified"
        );
        classification
    }

    fn step_merge(
        &self,
        store: &mut RecordStore,
        ctx: &MessageContext<'_>,
        classification: Classification,
    ) -> Result<MessageOutcome, PipelineError> {
        let key = IdentityKey::new(
            &classification.title,
            &classification.company,
            classification.status.clone(),
        );
        // Only messages without an identifier fall back to the identity key.
        if ctx.uid().is_none() && store.contains_identity(&key) {
            debug!("Same title, company and status already tracked");
            return Ok(MessageOutcome::Skipped(SkipReason::Duplicate));
        }

        let candidate = store
            .rows_for_company(&classification.company)
            .iter()
            .copied()
            .find(|&row| {
                store
                    .get(row)
                    .is_some_and(|record| should_update(&record.status, &classification.status))
            });

        if let Some(row) = candidate {
            store.update_status(row, classification.status.clone(), ctx.email.uid.clone())?;
            store.register_identity(key);
            info!(%row, status = %classification.status, "Advanced application status");
            return Ok(MessageOutcome::Updated(row));
        }

        let record = JobApplicationRecord {
            date: ctx
                .date
                .unwrap_or_else(|| parse_sent_date(ctx.email.date.as_deref())),
            title: classification.title,
            company: classification.company,
            status: classification.status,
            sender: ctx.sender.clone(),
            message_id: ctx.email.uid.clone(),
        };
        let row = store.insert(record)?;
        info!(%row, "Tracked new application");
        Ok(MessageOutcome::Created(row))
    }
}
