use super::layout::{html_escape, page};
use services::ticket_detail::TicketDetail;

pub fn render(detail: &TicketDetail) -> String {
    let ticket = &detail.ticket;
    let id = ticket.id;
    let title = html_escape(&ticket.title);
    let queue = detail
        .queue
        .as_ref()
        .map(|q| html_escape(&q.title))
        .unwrap_or_default();
    let submitter = ticket
        .submitter_email
        .as_deref()
        .map(html_escape)
        .unwrap_or_else(|| "-".to_string());

    let mut custom = String::new();
    for (field, value) in &detail.custom_values {
        custom.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>",
            html_escape(&field.label),
            html_escape(value)
        ));
    }

    let mut history = String::new();
    for entry in &detail.follow_ups {
        let fu = &entry.follow_up;
        history.push_str(&format!(
            r##"<li class="followup">
                <strong>{title}</strong> <small>{when}{visibility}</small>
                <p>{comment}</p>"##,
            title = html_escape(&fu.title),
            when = fu.created_at.format("%Y-%m-%d %H:%M"),
            visibility = if fu.public { " (public)" } else { "" },
            comment = html_escape(&fu.comment),
        ));
        if !entry.attachments.is_empty() {
            history.push_str("<ul class=\"attachments\">");
            for a in &entry.attachments {
                history.push_str(&format!(
                    "<li>{} ({} bytes)</li>",
                    html_escape(&a.filename),
                    a.size
                ));
            }
            history.push_str("</ul>");
        }
        history.push_str("</li>");
    }
    if history.is_empty() {
        history.push_str("<li>No follow-ups yet.</li>");
    }

    let body = format!(
        r##"<h1>[{id}] {title}</h1>
        <p><a href="/update/{id}">Edit ticket</a></p>
        <table class="ticket">
            <tr><th>Queue</th><td>{queue}</td></tr>
            <tr><th>Priority</th><td>{priority}</td></tr>
            <tr><th>Status</th><td>{status}</td></tr>
            <tr><th>Submitter E-Mail</th><td>{submitter}</td></tr>
            <tr><th>Description</th><td>{description}</td></tr>
            {custom}
        </table>
        <h2>Follow-ups</h2>
        <ul class="followups">{history}</ul>"##,
        priority = ticket.priority.label(),
        status = ticket.status,
        description = html_escape(&ticket.description),
    );

    page(&ticket.title, &body)
}
