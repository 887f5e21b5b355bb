use super::layout::{html_escape, page};
use db::models::ticket::Model as TicketModel;

pub fn render(tickets: &[TicketModel]) -> String {
    let mut rows = String::new();
    for ticket in tickets {
        let id = ticket.id;
        rows.push_str(&format!(
            r##"<tr>
                <td>{id}</td>
                <td><a href="/tickets/{id}">{title}</a></td>
                <td>{priority}</td>
                <td>{status}</td>
                <td><a href="/update/{id}">Edit</a></td>
            </tr>"##,
            title = html_escape(&ticket.title),
            priority = ticket.priority.label(),
            status = ticket.status,
        ));
    }

    let listing = if tickets.is_empty() {
        "<p>No tickets yet.</p>".to_string()
    } else {
        format!(
            r##"<table>
                <thead><tr><th>#</th><th>Title</th><th>Priority</th><th>Status</th><th></th></tr></thead>
                <tbody>{rows}</tbody>
            </table>"##
        )
    };

    let body = format!(
        r##"<h1>Tickets</h1>
        {listing}
        <form method="post" action="/logout"><button type="submit">Log out</button></form>"##
    );

    page("Tickets", &body)
}
