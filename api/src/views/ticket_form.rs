//! The staff ticket update form.
//!
//! Standard fields come first, then every applicable custom field in display
//! order, then the follow-up comment and attachment inputs. When the form
//! carries errors a banner is shown and each field lists its own messages.

use super::layout::{error_list, html_escape, page};
use db::models::custom_field::{CustomFieldType, Model as CustomFieldModel};
use db::models::ticket::Priority;
use sea_orm::{ActiveEnum, Iterable};
use services::ticket_update::{ATTACHMENT_FIELD, TicketForm};

pub const ERROR_BANNER: &str = "There are errors in the form";

pub fn render(form: &TicketForm) -> String {
    let id = form.ticket.id;
    let values = &form.values;
    let errors = &form.errors;
    let mut fields = String::new();

    let banner = if form.has_errors() {
        format!(r#"<p class="errornote">{ERROR_BANNER}</p>"#)
    } else {
        String::new()
    };

    fields.push_str(&row(
        "title",
        "Title",
        true,
        &format!(
            r#"<input type="text" name="title" id="id_title" maxlength="200" value="{}">"#,
            html_escape(&values.title)
        ),
        errors.get("title"),
        None,
    ));

    let mut queue_options = String::new();
    for queue in &form.queues {
        let value = queue.id.to_string();
        queue_options.push_str(&format!(
            r#"<option value="{value}"{selected}>{title}</option>"#,
            selected = selected(values.queue == value),
            title = html_escape(&queue.title),
        ));
    }
    fields.push_str(&row(
        "queue",
        "Queue",
        true,
        &format!(r#"<select name="queue" id="id_queue">{queue_options}</select>"#),
        errors.get("queue"),
        None,
    ));

    let mut priority_options = String::new();
    for priority in Priority::iter() {
        let value = priority.to_value().to_string();
        priority_options.push_str(&format!(
            r#"<option value="{value}"{selected}>{label}</option>"#,
            selected = selected(values.priority == value),
            label = priority.label(),
        ));
    }
    fields.push_str(&row(
        "priority",
        "Priority",
        true,
        &format!(r#"<select name="priority" id="id_priority">{priority_options}</select>"#),
        errors.get("priority"),
        None,
    ));

    fields.push_str(&row(
        "body",
        "Description",
        false,
        &format!(
            r#"<textarea name="body" id="id_body" rows="10">{}</textarea>"#,
            html_escape(&values.body)
        ),
        errors.get("body"),
        None,
    ));

    fields.push_str(&row(
        "submitter_email",
        "Submitter E-Mail Address",
        false,
        &format!(
            r#"<input type="email" name="submitter_email" id="id_submitter_email" value="{}">"#,
            html_escape(&values.submitter_email)
        ),
        errors.get("submitter_email"),
        None,
    ));

    for field in &form.custom_fields {
        let key = field.form_key();
        fields.push_str(&row(
            &key,
            &field.label,
            field.required,
            &custom_input(field, values.custom_value(field.id)),
            errors.get(&key),
            field.help_text.as_deref(),
        ));
    }

    fields.push_str(&row(
        "comment",
        "Comment",
        false,
        &format!(
            r#"<textarea name="comment" id="id_comment" rows="4">{}</textarea>"#,
            html_escape(&values.comment)
        ),
        errors.get("comment"),
        None,
    ));

    fields.push_str(&row(
        "public",
        "Public",
        false,
        &format!(
            r#"<input type="checkbox" name="public" id="id_public" value="on"{}>"#,
            checked(values.public)
        ),
        errors.get("public"),
        Some("Public follow-ups are visible to the submitter."),
    ));

    fields.push_str(&row(
        ATTACHMENT_FIELD,
        "Attach File",
        false,
        &format!(
            r#"<input type="file" name="{ATTACHMENT_FIELD}" id="id_{ATTACHMENT_FIELD}" multiple>"#
        ),
        errors.get(ATTACHMENT_FIELD),
        None,
    ));

    let body = format!(
        r##"<h1>Update ticket [{id}] {title}</h1>
        {banner}
        <form method="post" action="/update/{id}" enctype="multipart/form-data">
            {fields}
            <button type="submit">Save changes</button>
            <a href="/tickets/{id}">Cancel</a>
        </form>"##,
        title = html_escape(&form.ticket.title),
    );

    page(&format!("Update ticket {id}"), &body)
}

fn row(
    key: &str,
    label: &str,
    required: bool,
    input: &str,
    errors: &[String],
    help: Option<&str>,
) -> String {
    let class = if errors.is_empty() {
        "form-row"
    } else {
        "form-row has-error"
    };
    let marker = if required { " *" } else { "" };
    let help = help
        .map(|h| format!(r#"<small class="help">{}</small>"#, html_escape(h)))
        .unwrap_or_default();

    format!(
        r##"<div class="{class}">
                {errors}
                <label for="id_{key}">{label}{marker}</label>
                {input}
                {help}
            </div>"##,
        key = html_escape(key),
        label = html_escape(label),
        errors = error_list(errors),
    )
}

fn custom_input(field: &CustomFieldModel, value: &str) -> String {
    let key = html_escape(&field.form_key());
    let value_attr = html_escape(value);
    let maxlength = field
        .max_length
        .map(|m| format!(r#" maxlength="{m}""#))
        .unwrap_or_default();

    let input = |kind: &str| {
        format!(r#"<input type="{kind}" name="{key}" id="id_{key}" value="{value_attr}"{maxlength}>"#)
    };

    match field.data_type {
        CustomFieldType::Varchar | CustomFieldType::Slug | CustomFieldType::Ipaddress => {
            input("text")
        }
        CustomFieldType::Email => input("email"),
        CustomFieldType::Url => input("url"),
        CustomFieldType::Integer | CustomFieldType::Decimal => input("text"),
        CustomFieldType::Date => input("date"),
        CustomFieldType::Time => input("time"),
        CustomFieldType::Datetime => input("text"),
        CustomFieldType::Text => format!(
            r#"<textarea name="{key}" id="id_{key}" rows="4"{maxlength}>{value_attr}</textarea>"#
        ),
        CustomFieldType::Boolean => format!(
            r#"<input type="checkbox" name="{key}" id="id_{key}" value="on"{}>"#,
            checked(value == "True")
        ),
        CustomFieldType::List => {
            let mut options = String::new();
            if field.empty_selection_list || !field.required {
                options.push_str(r#"<option value="">---------</option>"#);
            }
            for choice in field.choices() {
                options.push_str(&format!(
                    r#"<option value="{c}"{selected}>{c}</option>"#,
                    c = html_escape(&choice),
                    selected = selected(choice == value),
                ));
            }
            format!(r#"<select name="{key}" id="id_{key}">{options}</select>"#)
        }
    }
}

fn selected(on: bool) -> &'static str {
    if on { " selected" } else { "" }
}

fn checked(on: bool) -> &'static str {
    if on { " checked" } else { "" }
}
