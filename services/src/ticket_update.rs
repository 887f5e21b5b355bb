//! Staff ticket update workflow.
//!
//! A GET renders the form produced by [`load_form`]. A POST goes through
//! [`submit`], which either persists the whole update in one transaction or
//! hands the form back with per-field errors and the submitted values. Both
//! paths fetch the custom fields that apply to the ticket's queue on every
//! call, so the rendered form always carries their labels.

use crate::custom_fields::{self, REQUIRED};
use crate::error::ServiceError;
use db::models::{
    custom_field::{CustomFieldType, Model as CustomFieldModel},
    follow_up::Model as FollowUpModel,
    followup_attachment::Model as FollowUpAttachmentModel,
    queue::Model as QueueModel,
    ticket::{Model as TicketModel, Priority, TicketChanges},
    ticket_custom_field_value::Model as ValueModel,
};
use sea_orm::{ActiveEnum, DatabaseConnection, TransactionTrait};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use util::paths::{followup_attachment_path, unique_filename};
use util::validators::{
    AttachmentError, validate_attachment_name, validate_attachment_path, validate_file_extension,
};
use validator::{Validate, ValidationErrors};

/// Form key carrying uploaded files.
pub const ATTACHMENT_FIELD: &str = "attachment";

const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";

/// Field-scoped validation messages, kept in form order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        match self.fields.iter_mut().find(|(f, _)| f == field) {
            Some((_, messages)) => messages.push(message.into()),
            None => self.fields.push((field.to_string(), vec![message.into()])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Messages for `field`; empty when the field is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.fields
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(f, messages)| (f.as_str(), messages.as_slice()))
    }

    /// Copies `validator` errors over, visiting fields in `order`.
    fn extend_from_validation(&mut self, errors: &ValidationErrors, order: &[&str]) {
        let by_field = errors.field_errors();
        for field in order {
            if let Some(errs) = by_field.get(*field) {
                for err in errs.iter() {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    self.add(field, message);
                }
            }
        }
    }
}

/// One uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// The raw POST body: text fields (last value wins) plus uploaded files.
#[derive(Debug, Clone, Default)]
pub struct TicketSubmission {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl TicketSubmission {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut submission = Self::default();
        for (key, value) in pairs {
            submission.insert_field(key, value);
        }
        submission
    }

    pub fn insert_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn add_file(&mut self, file: UploadedFile) {
        self.files.push(file);
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Files the user actually picked. Browsers send an empty part for an
    /// untouched file input.
    pub fn files(&self) -> impl Iterator<Item = &UploadedFile> {
        self.files
            .iter()
            .filter(|f| !(f.filename.is_empty() && f.data.is_empty()))
    }

    /// Value for a custom field, accepted under `custom_<name>` or `<name>`.
    pub fn custom_value(&self, field: &CustomFieldModel) -> Option<&str> {
        self.field(&field.form_key())
            .or_else(|| self.field(&field.name))
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.field(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }
}

/// Values shown in the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormValues {
    pub title: String,
    pub queue: String,
    pub priority: String,
    pub body: String,
    pub submitter_email: String,
    pub comment: String,
    pub public: bool,
    /// Keyed by custom field id.
    pub custom: HashMap<i64, String>,
}

impl FormValues {
    fn from_ticket(ticket: &TicketModel, custom: HashMap<i64, String>) -> Self {
        Self {
            title: ticket.title.clone(),
            queue: ticket.queue_id.to_string(),
            priority: ticket.priority.to_value().to_string(),
            body: ticket.description.clone(),
            submitter_email: ticket.submitter_email.clone().unwrap_or_default(),
            comment: String::new(),
            public: false,
            custom,
        }
    }

    fn from_submission(submission: &TicketSubmission, fields: &[CustomFieldModel]) -> Self {
        let text = |key: &str| submission.field(key).unwrap_or("").to_string();

        let custom = fields
            .iter()
            .map(|field| {
                let raw = submission.custom_value(field);
                let value = match field.data_type {
                    CustomFieldType::Boolean if custom_fields::is_checked(raw) => "True".to_string(),
                    CustomFieldType::Boolean => "False".to_string(),
                    _ => raw.unwrap_or("").to_string(),
                };
                (field.id, value)
            })
            .collect();

        Self {
            title: text("title"),
            queue: text("queue"),
            priority: text("priority"),
            body: text("body"),
            submitter_email: text("submitter_email"),
            comment: text("comment"),
            public: custom_fields::is_checked(submission.field("public")),
            custom,
        }
    }

    pub fn custom_value(&self, field_id: i64) -> &str {
        self.custom.get(&field_id).map(String::as_str).unwrap_or("")
    }
}

/// Everything needed to render the update form.
#[derive(Debug, Clone)]
pub struct TicketForm {
    pub ticket: TicketModel,
    pub queues: Vec<QueueModel>,
    /// Applicable custom fields in display order.
    pub custom_fields: Vec<CustomFieldModel>,
    pub values: FormValues,
    pub errors: FormErrors,
}

impl TicketForm {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Persisted {
        ticket: TicketModel,
        follow_up: FollowUpModel,
    },
    /// Nothing was written; redisplay the form.
    Invalid(TicketForm),
}

#[derive(Debug, Validate)]
struct StandardFields {
    #[validate(
        required(message = "This field is required."),
        length(max = 200, message = "Ensure this value has at most 200 characters.")
    )]
    title: Option<String>,

    #[validate(
        required(message = "This field is required."),
        range(min = 1, message = "Select a valid choice. That choice is not one of the available choices.")
    )]
    queue: Option<i64>,

    #[validate(
        required(message = "This field is required."),
        range(min = 1, max = 5, message = "Select a valid choice. That choice is not one of the available choices.")
    )]
    priority: Option<i32>,

    #[validate(email(message = "Enter a valid email address."))]
    submitter_email: Option<String>,
}

/// Loads the form for `ticket_id`, pre-filled from the stored ticket.
/// `None` when the ticket does not exist.
pub async fn load_form(
    db: &DatabaseConnection,
    ticket_id: i64,
) -> Result<Option<TicketForm>, ServiceError> {
    let Some(ticket) = TicketModel::get_by_id(db, ticket_id).await? else {
        return Ok(None);
    };

    let custom_fields = CustomFieldModel::for_queue(db, ticket.queue_id).await?;
    let stored = ValueModel::map_for_ticket(db, ticket.id).await?;
    let queues = QueueModel::find_all(db).await?;

    Ok(Some(TicketForm {
        values: FormValues::from_ticket(&ticket, stored),
        errors: FormErrors::default(),
        ticket,
        queues,
        custom_fields,
    }))
}

/// Validates and applies a submission. `None` when the ticket does not exist.
///
/// On success the ticket, its custom values, one follow-up and any attachment
/// rows commit together. Attachment bytes are written under `storage_root`
/// before the commit and removed again if anything fails.
pub async fn submit(
    db: &DatabaseConnection,
    storage_root: &Path,
    ticket_id: i64,
    user_id: Option<i64>,
    submission: &TicketSubmission,
) -> Result<Option<UpdateOutcome>, ServiceError> {
    let Some(ticket) = TicketModel::get_by_id(db, ticket_id).await? else {
        return Ok(None);
    };

    let custom_fields = CustomFieldModel::for_queue(db, ticket.queue_id).await?;
    let mut errors = FormErrors::default();

    let changes = validate_standard(db, submission, &mut errors).await?;

    let mut custom_values = Vec::with_capacity(custom_fields.len());
    for field in &custom_fields {
        match custom_fields::clean_value(field, submission.custom_value(field)) {
            Ok(value) => custom_values.push((field, value)),
            Err(message) => errors.add(&field.form_key(), message),
        }
    }

    for file in submission.files() {
        if let Err(e) = check_upload(ticket.id, &file.filename) {
            errors.add(ATTACHMENT_FIELD, e.to_string());
        }
    }

    let changes = match changes {
        Some(changes) if errors.is_empty() => changes,
        _ => {
            tracing::info!(
                ticket_id,
                fields = ?errors.iter().map(|(f, _)| f).collect::<Vec<_>>(),
                "Ticket update rejected"
            );
            let queues = QueueModel::find_all(db).await?;
            return Ok(Some(UpdateOutcome::Invalid(TicketForm {
                values: FormValues::from_submission(submission, &custom_fields),
                errors,
                ticket,
                queues,
                custom_fields,
            })));
        }
    };

    let stored = ValueModel::map_for_ticket(db, ticket.id).await?;
    let mut changed: Vec<String> = changes
        .changed_fields(&ticket)
        .into_iter()
        .map(str::to_owned)
        .collect();
    for (field, value) in &custom_values {
        if stored.get(&field.id).map(String::as_str).unwrap_or("") != value {
            changed.push(field.name.clone());
        }
    }

    let title = follow_up_title(&changed);
    let comment = submission.field("comment").unwrap_or("").trim().to_string();
    let public = custom_fields::is_checked(submission.field("public"));
    let files: Vec<&UploadedFile> = submission.files().collect();

    let txn = db.begin().await?;
    let mut written: Vec<PathBuf> = Vec::new();

    let result = async {
        let updated = TicketModel::apply_changes(&txn, ticket, changes).await?;

        for (field, value) in &custom_values {
            ValueModel::upsert(&txn, updated.id, field.id, value).await?;
        }

        let follow_up =
            FollowUpModel::create(&txn, updated.id, user_id, &title, &comment, public).await?;

        let mut taken = HashSet::new();
        for file in &files {
            let stored_name = unique_filename(&file.filename, &taken);
            let relative = followup_attachment_path(updated.id, follow_up.id, &stored_name);
            taken.insert(stored_name);
            let absolute = storage_root.join(&relative);
            if let Some(parent) = absolute.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&absolute, &file.data).await?;
            written.push(absolute);

            FollowUpAttachmentModel::create(
                &txn,
                follow_up.id,
                &relative,
                &file.filename,
                &file.content_type,
                file.data.len() as i64,
            )
            .await?;
        }

        Ok::<_, ServiceError>((updated, follow_up))
    }
    .await;

    match result {
        Ok((ticket, follow_up)) => {
            if let Err(e) = txn.commit().await {
                remove_files(&written).await;
                return Err(e.into());
            }
            tracing::info!(
                ticket_id = ticket.id,
                follow_up_id = follow_up.id,
                attachments = written.len(),
                "Ticket updated"
            );
            Ok(Some(UpdateOutcome::Persisted { ticket, follow_up }))
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::warn!(error = %rollback_err, "Rollback failed");
            }
            remove_files(&written).await;
            Err(e)
        }
    }
}

/// Checks the standard fields. Returns the changes when they are all valid.
async fn validate_standard(
    db: &DatabaseConnection,
    submission: &TicketSubmission,
    errors: &mut FormErrors,
) -> Result<Option<TicketChanges>, ServiceError> {
    // Unparseable numbers become 0 so the range check reports them.
    let fields = StandardFields {
        title: submission.non_empty("title"),
        queue: submission
            .non_empty("queue")
            .map(|q| q.parse::<i64>().unwrap_or(0)),
        priority: submission
            .non_empty("priority")
            .map(|p| p.parse::<i32>().unwrap_or(0)),
        submitter_email: submission.non_empty("submitter_email"),
    };

    if let Err(e) = fields.validate() {
        errors.extend_from_validation(&e, &["title", "queue", "priority", "submitter_email"]);
    }

    let queue = match fields.queue {
        Some(id) if errors.get("queue").is_empty() => {
            let queue = QueueModel::get_by_id(db, id).await?;
            if queue.is_none() {
                errors.add("queue", INVALID_CHOICE);
            }
            queue
        }
        _ => None,
    };

    let priority = fields.priority.and_then(Priority::from_value);

    Ok(match (fields.title, queue, priority) {
        (Some(title), Some(queue), Some(priority)) if errors.is_empty() => Some(TicketChanges {
            title,
            queue_id: queue.id,
            priority,
            description: submission.field("body").unwrap_or("").to_string(),
            submitter_email: fields.submitter_email,
        }),
        _ => None,
    })
}

/// Everything about an upload that can be checked before anything is written.
fn check_upload(ticket_id: i64, filename: &str) -> Result<(), AttachmentError> {
    validate_file_extension(filename)?;
    validate_attachment_name(filename)?;
    // Widest follow-up id the stored path can carry.
    validate_attachment_path(&followup_attachment_path(ticket_id, i64::MAX, filename))
}

fn follow_up_title(changed: &[String]) -> String {
    if changed.is_empty() {
        "Comment added".to_string()
    } else {
        format!("Updated {}", changed.join(", "))
    }
}

async fn remove_files(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %e, "Could not remove attachment");
        }
    }
}
